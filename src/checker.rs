use crate::data::Report;
use crate::record::{Category, LookupOutcome};
use crate::resolver::{lookup, lookup_reverse, Resolve};
use regex::{Regex, RegexBuilder};
use tracing::info;

// SPF policies are the TXT records of the domain itself that start with `v=spf`.
const SPF_PATTERN: &str = "^v=spf";

/// Runs the enabled checks for every host, one query at a time, and collects the results.
pub struct Checker<R> {
    resolver: R,
    categories: Vec<Category>,
    spf: Regex,
}

impl<R: Resolve> Checker<R> {
    pub fn new(resolver: R) -> Self {
        let spf = RegexBuilder::new(SPF_PATTERN)
            .case_insensitive(true)
            .build()
            .expect("SPF_PATTERN is a valid regex");
        Self {
            resolver,
            categories: Vec::new(),
            spf,
        }
    }

    /// Builder method that enables a category. Categories are always checked in the order of
    /// `Category::ALL`, whatever order they are enabled in.
    pub fn enable(mut self, category: Category) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
            self.categories.sort_by_key(|c| Category::ALL.iter().position(|a| a == c));
        }
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Issues the query one category needs for one host.
    pub async fn check_one(&self, category: Category, host: &str) -> LookupOutcome {
        match category {
            Category::Dmarc => {
                lookup(&self.resolver, &format!("_dmarc.{}", host), category.kind(), None).await
            }
            Category::Spf => lookup(&self.resolver, host, category.kind(), Some(&self.spf)).await,
            Category::Mx | Category::A => lookup(&self.resolver, host, category.kind(), None).await,
            Category::Ptr => lookup_reverse(&self.resolver, host).await,
        }
    }

    /// Checks every host against every enabled category. Rows keep the host as it was given,
    /// not the name that was queried.
    pub async fn check<I, S>(&self, hosts: I) -> Report
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = Report::new();
        for host in hosts {
            let host = host.as_ref().trim();
            info!("Processing: {}", host);
            for &category in &self.categories {
                let outcome = self.check_one(category, host).await;
                report.record(category, host, outcome);
            }
        }
        report
    }
}
