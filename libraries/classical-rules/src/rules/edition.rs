//! Edition rules

use crate::rule::{Rule, RuleContext};
use classical_core::{Issue, Scope};

/// ed.catalog: an edition names its catalog number.
pub struct CatalogNumber;

impl Rule for CatalogNumber {
    fn id(&self) -> &'static str {
        "ed.catalog"
    }

    fn description(&self) -> &'static str {
        "Edition should carry a catalog number"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        match &ctx.release.edition {
            Some(edition) if edition.catalog_number.is_none() => vec![Issue::warning(
                Scope::Album,
                self.id(),
                "edition has no catalog number",
            )],
            _ => Vec::new(),
        }
    }
}

/// ed.missing: the release describes its edition.
pub struct MissingEdition;

impl Rule for MissingEdition {
    fn id(&self) -> &'static str {
        "ed.missing"
    }

    fn description(&self) -> &'static str {
        "Release should describe its edition"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        if ctx.release.edition.is_some() {
            return Vec::new();
        }
        vec![Issue::warning(
            Scope::Album,
            self.id(),
            "no edition information (label, catalog number, year)",
        )]
    }
}
