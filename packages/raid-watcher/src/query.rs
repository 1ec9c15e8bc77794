use crate::subscription::Subscription;
use crate::vocab::{Category, VocabError, Vocabulary};

/// Build the items_bundle query for one subscription.
///
/// `Any` criteria are omitted entirely; name criteria are translated to the
/// board's Japanese vocabulary; the star level drops its `★` suffix and is
/// passed as bare digits. The page-size limit is always present.
pub fn build_query(
    sub: &Subscription,
    vocab: &Vocabulary,
    limit: u32,
) -> Result<Vec<(&'static str, String)>, VocabError> {
    let mut query = Vec::new();

    if let Some(name) = sub.pokemon.as_only() {
        query.push((
            "pokemonName",
            vocab.to_japanese(Category::Pokemon, name)?.to_string(),
        ));
    }
    if let Some(name) = sub.tera_type.as_only() {
        query.push((
            "terasType",
            vocab.to_japanese(Category::TeraType, name)?.to_string(),
        ));
    }
    if let Some(stars) = sub.stars.as_only() {
        let level = stars.strip_suffix('★').unwrap_or(stars);
        query.push(("difficultyLevel", level.to_string()));
    }
    if let Some(label) = sub.join_condition.as_only() {
        query.push((
            "requestTag",
            vocab.to_japanese(Category::JoinLabel, label)?.to_string(),
        ));
    }
    query.push(("limit", limit.to_string()));

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::Criterion;
    use crate::vocab::{MetaNameEntry, PokemonNameEntry};

    fn vocab() -> Vocabulary {
        Vocabulary::new(
            vec![PokemonNameEntry {
                english_name: "Ditto".into(),
                japanese_name: "メタモン".into(),
            }],
            vec![
                MetaNameEntry {
                    kind: "type".into(),
                    english_name: "Fire".into(),
                    japanese_name: "ほのお".into(),
                },
                MetaNameEntry {
                    kind: "label".into(),
                    english_name: "Legends Only".into(),
                    japanese_name: "伝説のみ".into(),
                },
            ],
        )
    }

    fn sub(pokemon: Criterion, tera: Criterion, stars: Criterion, cond: Criterion) -> Subscription {
        Subscription {
            pokemon,
            tera_type: tera,
            stars,
            join_condition: cond,
        }
    }

    #[test]
    fn test_all_any_yields_only_the_limit() {
        let query = build_query(
            &sub(Criterion::Any, Criterion::Any, Criterion::Any, Criterion::Any),
            &vocab(),
            30,
        )
        .unwrap();
        assert_eq!(query, vec![("limit", "30".to_string())]);
    }

    #[test]
    fn test_ditto_six_star_query() {
        let query = build_query(
            &sub(
                Criterion::Only("Ditto".into()),
                Criterion::Any,
                Criterion::Only("6★".into()),
                Criterion::Any,
            ),
            &vocab(),
            30,
        )
        .unwrap();
        assert_eq!(
            query,
            vec![
                ("pokemonName", "メタモン".to_string()),
                ("difficultyLevel", "6".to_string()),
                ("limit", "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_type_and_label_are_translated() {
        let query = build_query(
            &sub(
                Criterion::Any,
                Criterion::Only("Fire".into()),
                Criterion::Any,
                Criterion::Only("Legends Only".into()),
            ),
            &vocab(),
            30,
        )
        .unwrap();
        assert_eq!(
            query,
            vec![
                ("terasType", "ほのお".to_string()),
                ("requestTag", "伝説のみ".to_string()),
                ("limit", "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_untranslatable_name_propagates() {
        let err = build_query(
            &sub(
                Criterion::Only("Missingno".into()),
                Criterion::Any,
                Criterion::Any,
                Criterion::Any,
            ),
            &vocab(),
            30,
        )
        .unwrap_err();
        assert!(matches!(err, VocabError::UnknownTerm { category: Category::Pokemon, .. }));
    }
}
