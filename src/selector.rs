use crate::error::Error;

/// A parsed field selector: one separator character and the ordered field
/// paths to project.
///
/// The selector syntax is `<separator><path1><separator><path2>...`, for
/// example `:name:nested.field`. The first character picks the separator,
/// which doubles as the join character between projected values. `.` is the
/// nested-field access operator and therefore the one character that can
/// never serve as a separator. Parsing operates on decoded characters, so a
/// non-ASCII separator such as `€` works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    separator: char,
    field_paths: Vec<String>,
}

impl Selector {
    /// Parse a raw selector string.
    ///
    /// Fails when the string has one character or fewer, or when `.` is
    /// chosen as the separator. Paths are trimmed of surrounding
    /// whitespace; an empty path is accepted and simply never matches.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut chars = text.chars();
        let separator = chars
            .next()
            .ok_or_else(|| Error::InvalidSelector(text.to_string()))?;
        let rest = chars.as_str();
        if rest.is_empty() {
            return Err(Error::InvalidSelector(text.to_string()));
        }
        if separator == '.' {
            return Err(Error::InvalidSelector(
                "can't use '.' as separator".to_string(),
            ));
        }

        let field_paths = rest
            .split(separator)
            .map(|path| path.trim().to_string())
            .collect();

        Ok(Self {
            separator,
            field_paths,
        })
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn field_paths(&self) -> &[String] {
        &self.field_paths
    }
}
