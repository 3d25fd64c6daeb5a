/// Selects directory entries by an exact, case-sensitive name suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffix: String,
}

impl ExtensionFilter {
    pub fn new<S: Into<String>>(suffix: S) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_matching() {
        let filter = ExtensionFilter::new(".dart");

        assert!(filter.matches("main.dart"));
        assert!(filter.matches("nfc.g.dart"));
        assert!(!filter.matches("main.kt"));
        assert!(!filter.matches("main.dart.bak"));
        assert!(!filter.matches("dart"));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = ExtensionFilter::new(".txt");

        assert!(filter.matches("notes.txt"));
        assert!(!filter.matches("NOTES.TXT"));
        assert!(!filter.matches("notes.Txt"));
    }

    #[test]
    fn test_suffix_without_separator() {
        // Plain suffixes are honoured literally, so "kt" also matches "Makt".
        let filter = ExtensionFilter::new("kt");
        assert!(filter.matches("Plugin.kt"));
        assert!(filter.matches("Makt"));
    }
}
