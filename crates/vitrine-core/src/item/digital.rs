//! Digital item attributes.

use crate::types::{DigitalMarkdown, DiscountFamily};
use crate::validation::{validate_download_size_mb, validate_license_key};

/// Download size, license and discount restrictions of a digital item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DigitalAttributes {
    download_size_mb: f64,
    license_key: Option<String>,
    ignored_discounts: Vec<DiscountFamily>,
    markdown: DigitalMarkdown,
}

/// Result of assigning a download size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeAssignment {
    Rejected,
    Accepted,
    /// Accepted, and the legacy markdown wants the price cut.
    AcceptedWithMarkdown,
}

impl DigitalAttributes {
    pub fn new() -> Self {
        DigitalAttributes::default()
    }

    pub fn download_size_mb(&self) -> f64 {
        self.download_size_mb
    }

    pub fn license_key(&self) -> Option<&str> {
        self.license_key.as_deref()
    }

    /// True when a non-blank license key is present.
    pub fn is_license_required(&self) -> bool {
        self.license_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub fn ignored_discounts(&self) -> &[DiscountFamily] {
        &self.ignored_discounts
    }

    pub fn ignores(&self, family: DiscountFamily) -> bool {
        self.ignored_discounts.contains(&family)
    }

    pub fn markdown(&self) -> DigitalMarkdown {
        self.markdown
    }

    /// Refuses a whole discount family for this item.
    pub fn ignore_discount(&mut self, family: DiscountFamily) {
        if !self.ignores(family) {
            self.ignored_discounts.push(family);
        }
    }

    pub fn set_markdown(&mut self, markdown: DigitalMarkdown) {
        self.markdown = markdown;
    }

    pub fn try_set_license_key(&mut self, key: Option<&str>) -> bool {
        match validate_license_key(key) {
            Ok(key) => {
                self.license_key = key;
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn assign_download_size(&mut self, size_mb: f64) -> SizeAssignment {
        match validate_download_size_mb(size_mb) {
            Ok(size_mb) => {
                self.download_size_mb = size_mb;
                if self.markdown == DigitalMarkdown::Legacy
                    && size_mb < crate::LEGACY_MARKDOWN_THRESHOLD_MB
                {
                    SizeAssignment::AcceptedWithMarkdown
                } else {
                    SizeAssignment::Accepted
                }
            }
            Err(_) => SizeAssignment::Rejected,
        }
    }
}
