//! Property tests for lookup and interpolation invariants.

use proptest::prelude::*;
use rosetta_i18n::{params, Catalog, MessageTable, NoContent, Source, Translator};

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_.]{0,12}"
}

fn template_strategy() -> impl Strategy<Value = String> {
    "[^{}]{1,40}"
}

proptest! {
    #[test]
    fn regional_tag_resolves_to_base_table(
        base in "[a-z]{2,3}",
        region in "[A-Z]{2}",
        key in key_strategy(),
        value in template_strategy(),
    ) {
        let table: MessageTable = [(key.clone(), value.clone())].into_iter().collect();
        let catalog = Catalog::new().with_table(base.clone(), table);
        let translator = Translator::new(&catalog, &format!("{base}-{region}"), None);

        prop_assert!(translator.has_primary_table());
        prop_assert_eq!(translator.text(key.as_str()), value);
    }

    #[test]
    fn present_value_is_returned_verbatim(key in key_strategy(), value in "[^{]{1,40}") {
        let table: MessageTable = [(key.clone(), value.clone())].into_iter().collect();
        let catalog = Catalog::new().with_table("en", table);
        let translator = Translator::new(&catalog, "en", None);

        let resolution = translator.resolve::<NoContent>(key.as_str(), None, None);
        prop_assert_eq!(resolution.source, Source::Primary);
        prop_assert_eq!(resolution.message.into_string(), value);
    }

    #[test]
    fn absent_key_passes_through(key in key_strategy()) {
        let catalog = Catalog::new()
            .with_table("en", MessageTable::new())
            .with_table("de", MessageTable::new());
        let translator = Translator::new(&catalog, "en", Some("de"));

        prop_assert_eq!(translator.text(key.as_str()), key);
    }

    #[test]
    fn placeholder_free_templates_ignore_params(
        value in template_strategy(),
        name in "[a-z]{1,8}",
        param in "[a-zA-Z ]{0,10}",
    ) {
        let table: MessageTable = [("k", value.clone())].into_iter().collect();
        let catalog = Catalog::new().with_table("en", table);
        let translator = Translator::new(&catalog, "en", None);

        let message = translator.translate("k", Some(&params![name => param]), None);
        prop_assert_eq!(message.into_string(), value);
    }
}
