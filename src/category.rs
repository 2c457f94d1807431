//! The fixed set of categories an expense can belong to.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// What an expense was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Meals, snacks and groceries.
    Food,
    /// Hotels, hostels and other lodging.
    Accommodation,
    /// Flights, trains, taxis, fuel and similar.
    Transportation,
    /// Tours, shows and tickets.
    Entertainment,
    /// Souvenirs and other purchases.
    Shopping,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// The number of categories.
    pub const COUNT: usize = 6;

    /// Every category in canonical order.
    pub const ALL: [ExpenseCategory; Self::COUNT] = [
        ExpenseCategory::Food,
        ExpenseCategory::Accommodation,
        ExpenseCategory::Transportation,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    /// The key used to store the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Transportation => "transportation",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Other => "other",
        }
    }

    /// The name shown to people.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Accommodation => "Accommodation",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Other => "Other",
        }
    }

    /// An emoji that represents the category.
    pub fn icon(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "🍽️",
            ExpenseCategory::Accommodation => "🏨",
            ExpenseCategory::Transportation => "🚗",
            ExpenseCategory::Entertainment => "🎭",
            ExpenseCategory::Shopping => "🛍️",
            ExpenseCategory::Other => "📌",
        }
    }

    /// The position of the category in [ExpenseCategory::ALL].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();

        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == key)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl ToSql for ExpenseCategory {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ExpenseCategory {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, ExpenseCategory};

    #[test]
    fn all_lists_categories_in_index_order() {
        for (position, category) in ExpenseCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    #[test]
    fn parses_storage_keys() {
        for category in ExpenseCategory::ALL {
            assert_eq!(category.as_str().parse(), Ok(category));
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(" Transportation ".parse(), Ok(ExpenseCategory::Transportation));
    }

    #[test]
    fn parsing_rejects_unknown_category() {
        let result: Result<ExpenseCategory, Error> = "groceries".parse();

        assert_eq!(result, Err(Error::InvalidCategory("groceries".to_owned())));
    }

    #[test]
    fn serializes_as_storage_key() {
        let json = serde_json::to_string(&ExpenseCategory::Accommodation).unwrap();

        assert_eq!(json, "\"accommodation\"");
    }
}
