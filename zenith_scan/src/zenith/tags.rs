//! Wire vocabulary: tuple type tags and named-parameter keys

/// Tags of boolean tuple nodes other than field-matching nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanTag {
    And,
    Or,
    Not,
    Equals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    All,
    None,
}

impl BooleanTag {
    /// Parse tag from string (exact match, case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "And" => Some(Self::And),
            "Or" => Some(Self::Or),
            "Not" => Some(Self::Not),
            "=" => Some(Self::Equals),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanOrEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            "All" => Some(Self::All),
            "None" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::Equals => "=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::All => "All",
            Self::None => "None",
        }
    }
}

/// Tags of numeric (arithmetic) tuple nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericTag {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Neg,
    Pos,
    Abs,
    If,
}

impl NumericTag {
    /// Parse tag from string (exact match, case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "%" => Some(Self::Mod),
            "Neg" => Some(Self::Neg),
            "Pos" => Some(Self::Pos),
            "Abs" => Some(Self::Abs),
            "If" => Some(Self::If),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Neg => "Neg",
            Self::Pos => "Pos",
            Self::Abs => "Abs",
            Self::If => "If",
        }
    }
}

/// Keys of the named-parameter object
pub mod named {
    pub const AT: &str = "At";
    pub const MIN: &str = "Min";
    pub const MAX: &str = "Max";
    pub const AS: &str = "As";
    pub const IGNORE_CASE: &str = "IgnoreCase";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_tags() {
        assert_eq!(BooleanTag::parse(">="), Some(BooleanTag::GreaterThanOrEqual));
        assert_eq!(BooleanTag::parse("and"), None);
        assert_eq!(BooleanTag::Equals.as_str(), "=");
    }

    #[test]
    fn test_numeric_tags() {
        assert_eq!(NumericTag::parse("%"), Some(NumericTag::Mod));
        assert_eq!(NumericTag::parse("Sqrt"), None);
        assert_eq!(NumericTag::If.as_str(), "If");
    }
}
