//! Discount rule sources

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::discounts::DiscountRules;

/// Errors loading discount rules.
#[derive(Debug, Error)]
pub enum DiscountFetchError {
    /// The source could not be read.
    #[error("failed to read discount rules: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing error
    #[error("failed to parse discount rules JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("failed to parse discount rules YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Somewhere discount rules can be fetched from.
pub trait DiscountSource {
    /// Fetch the full rule set.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountFetchError`] if the rules cannot be read or parsed.
    async fn fetch(&self) -> Result<DiscountRules, DiscountFetchError>;
}

/// Rules stored in a JSON or YAML file.
///
/// Files ending in `.yml` or `.yaml` are parsed as YAML, anything else as JSON.
#[derive(Debug, Clone)]
pub struct FileDiscountSource {
    path: PathBuf,
}

impl FileDiscountSource {
    /// Read rules from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_yaml(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml")
            })
    }
}

impl DiscountSource for FileDiscountSource {
    async fn fetch(&self) -> Result<DiscountRules, DiscountFetchError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;

        let rules = if self.is_yaml() {
            serde_norway::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        Ok(rules)
    }
}

/// Rules already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscountSource {
    rules: DiscountRules,
}

impl StaticDiscountSource {
    /// Serve `rules` on every fetch.
    pub fn new(rules: impl Into<DiscountRules>) -> Self {
        Self {
            rules: rules.into(),
        }
    }
}

impl DiscountSource for StaticDiscountSource {
    async fn fetch(&self) -> Result<DiscountRules, DiscountFetchError> {
        Ok(self.rules.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal::Decimal;
    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::discounts::DiscountRule;

    use super::*;

    #[tokio::test]
    async fn file_source_reads_json() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("cartDiscount.json");

        fs::write(
            &path,
            r#"[{"minTotalCartValue": 500, "discountPercentage": 5},
                {"minTotalCartValue": 1000, "discountPercentage": 10}]"#,
        )?;

        let rules = FileDiscountSource::new(&path).fetch().await?;

        assert_eq!(
            rules.as_slice(),
            &[
                DiscountRule::new(Decimal::from(1000), Decimal::from(10)),
                DiscountRule::new(Decimal::from(500), Decimal::from(5)),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn file_source_reads_yaml() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("discounts.yml");

        fs::write(
            &path,
            "- minTotalCartValue: 50\n  discountPercentage: 10\n- minTotalCartValue: 100\n  discountPercentage: 20\n",
        )?;

        let rules = FileDiscountSource::new(&path).fetch().await?;

        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules.as_slice().first().map(|rule| rule.min_total_cart_value),
            Some(Decimal::from(100))
        );

        Ok(())
    }

    #[tokio::test]
    async fn file_source_missing_file_is_io_error() -> TestResult {
        let dir = tempdir()?;

        let result = FileDiscountSource::new(dir.path().join("missing.json"))
            .fetch()
            .await;

        assert!(matches!(result, Err(DiscountFetchError::Io(_))));

        Ok(())
    }

    #[tokio::test]
    async fn file_source_malformed_json_is_parse_error() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("broken.json");

        fs::write(&path, "[{\"minTotalCartValue\": ")?;

        let result = FileDiscountSource::new(&path).fetch().await;

        assert!(matches!(result, Err(DiscountFetchError::Json(_))));

        Ok(())
    }
}
