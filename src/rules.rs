//! Filename classification rules for sorting downloads by suffix.
//!
//! Classification is driven by an explicit, ordered ruleset rather than
//! module-level tables: each rule pairs a [`Category`] with the filename
//! suffixes that select it, and [`RuleSet::classify`] returns at most one
//! category per file, the first rule whose suffix list matches.
//!
//! # Examples
//!
//! ```
//! use downsort::rules::{Category, RuleSet};
//!
//! let rules = RuleSet::new();
//! assert_eq!(rules.classify("photo.png"), Some(Category::Image));
//! assert_eq!(rules.classify("report.pdf"), Some(Category::Pdf));
//! assert_eq!(rules.classify("notes.txt"), None);
//! ```

/// Represents a sorting category.
///
/// Each category corresponds to one subfolder of the downloads root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (PNG, JPG, JPEG).
    Image,
    /// PDF documents.
    Pdf,
    /// Spreadsheet files (XLSX).
    Spreadsheet,
    /// Compressed archives (ZIP, RAR).
    Compressed,
    /// Executable files (EXE).
    Executable,
}

impl Category {
    /// Returns the subfolder name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use downsort::rules::Category;
    ///
    /// assert_eq!(Category::Image.dir_name(), "images");
    /// assert_eq!(Category::Compressed.dir_name(), "compressed");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Image => "images",
            Category::Pdf => "pdf",
            Category::Spreadsheet => "spreadsheets",
            Category::Compressed => "compressed",
            Category::Executable => "executables",
        }
    }

    /// Returns a human-readable description of this category.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Image => "Image files",
            Category::Pdf => "PDF documents",
            Category::Spreadsheet => "Spreadsheet files",
            Category::Compressed => "Compressed archives",
            Category::Executable => "Executable files",
        }
    }
}

/// A single classification rule: a category and the suffixes that select it.
#[derive(Debug, Clone)]
pub struct Rule {
    /// The category files matching this rule are sorted into.
    pub category: Category,
    /// Filename suffixes, each including the leading dot (e.g. `".png"`).
    pub suffixes: Vec<String>,
}

/// An ordered list of classification rules.
///
/// Rule order is the priority order: a filename that matches several rules is
/// classified by the earliest one, so a file is never claimed by more than
/// one category.
///
/// Matching is a case-sensitive, exact suffix comparison; `photo.PNG` does
/// not match a `.png` rule.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a `RuleSet` with the standard downloads rules.
    pub fn new() -> Self {
        let mut rules = Self::empty();
        rules.add_rule(Category::Image, &[".png", ".jpg", ".jpeg"]);
        rules.add_rule(Category::Pdf, &[".pdf"]);
        rules.add_rule(Category::Spreadsheet, &[".xlsx"]);
        rules.add_rule(Category::Compressed, &[".zip", ".rar"]);
        rules.add_rule(Category::Executable, &[".exe"]);
        rules
    }

    /// Creates a `RuleSet` with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule with the given suffixes, after all existing rules.
    pub fn add_rule(&mut self, category: Category, suffixes: &[&str]) {
        self.rules.push(Rule {
            category,
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
        });
    }

    /// Returns the rules in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classifies a filename, returning the category of the first matching
    /// rule, or `None` if no rule matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use downsort::rules::{Category, RuleSet};
    ///
    /// let rules = RuleSet::new();
    /// assert_eq!(rules.classify("archive.zip"), Some(Category::Compressed));
    /// assert_eq!(rules.classify("archive.ZIP"), None);
    /// ```
    pub fn classify(&self, file_name: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|rule| rule.suffixes.iter().any(|s| file_name.ends_with(s.as_str())))
            .map(|rule| rule.category)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
