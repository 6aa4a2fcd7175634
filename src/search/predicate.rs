// Compiled search filters and their SQL rendering

use sqlx::{QueryBuilder, Sqlite};

use super::criteria::{PlatformFilter, SearchCriteria};
use crate::models::{Game, Platform};

/// One field condition of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    PlatformIs(Platform),
    /// Literal substring match on the game name.
    NameContains(String),
}

/// Conjunction of clauses; no clauses matches every game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Append ` WHERE ...` to `qb` unless this predicate matches everything.
    ///
    /// Name needles are bound as `LIKE` patterns with `%`, `_` and `\`
    /// escaped; case folding is whatever the database's `LIKE` does.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (idx, clause) in self.clauses.iter().enumerate() {
            qb.push(if idx == 0 { " WHERE " } else { " AND " });
            match clause {
                Clause::PlatformIs(platform) => {
                    qb.push("platform = ").push_bind(platform.as_str());
                }
                Clause::NameContains(needle) => {
                    qb.push("name LIKE ")
                        .push_bind(like_pattern(needle))
                        .push(r" ESCAPE '\'");
                }
            }
        }
    }

    /// Evaluate against a game already in memory (case-sensitive).
    pub fn matches(&self, game: &Game) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::PlatformIs(platform) => game.platform == *platform,
            Clause::NameContains(needle) => game
                .name
                .as_deref()
                .is_some_and(|name| name.contains(needle.as_str())),
        })
    }
}

impl FromIterator<Clause> for Predicate {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

/// Compile validated criteria into a predicate. Never fails.
pub fn compile(criteria: &SearchCriteria) -> Predicate {
    let platform = match criteria.platform {
        PlatformFilter::Only(p) => Some(Clause::PlatformIs(p)),
        PlatformFilter::Any => None,
    };
    let name = (!criteria.name.is_empty()).then(|| Clause::NameContains(criteria.name.clone()));

    [platform, name].into_iter().flatten().collect()
}

fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn criteria(name: &str, platform: PlatformFilter) -> SearchCriteria {
        SearchCriteria {
            name: name.to_string(),
            platform,
        }
    }

    fn game(name: &str, platform: Platform) -> Game {
        let now = Utc::now();
        Game {
            id: 1,
            publisher_id: None,
            name: Some(name.to_string()),
            platform,
            store_id: None,
            bundle_id: None,
            app_version: None,
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_criteria_compile_to_match_all() {
        let predicate = compile(&criteria("", PlatformFilter::Any));
        assert!(predicate.is_match_all());
        assert!(predicate.matches(&game("anything", Platform::Android)));

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM games");
        predicate.push_where(&mut qb);
        assert_eq!(qb.sql(), "SELECT * FROM games");
    }

    #[test]
    fn both_fields_compile_to_conjunction() {
        let predicate = compile(&criteria("Search", PlatformFilter::Only(Platform::Ios)));
        assert_eq!(
            predicate.clauses(),
            &[
                Clause::PlatformIs(Platform::Ios),
                Clause::NameContains("Search".into())
            ]
        );

        assert!(predicate.matches(&game("Test Search App", Platform::Ios)));
        assert!(!predicate.matches(&game("Test Search App", Platform::Android)));
        assert!(!predicate.matches(&game("Test App", Platform::Ios)));

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM games");
        predicate.push_where(&mut qb);
        assert_eq!(
            qb.sql(),
            r"SELECT * FROM games WHERE platform = ? AND name LIKE ? ESCAPE '\'"
        );
    }

    #[test]
    fn compile_is_deterministic() {
        let c = criteria("Quest", PlatformFilter::Only(Platform::Android));
        assert_eq!(compile(&c), compile(&c));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern("Search"), "%Search%");
        assert_eq!(like_pattern("100%_off\\"), r"%100\%\_off\\%");
    }
}
