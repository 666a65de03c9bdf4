//! Menu options and primitive argument parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
    #[error("unknown option {0}")]
    UnknownOption(u32),
}

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Insert,
    SelectAll,
    Backup,
    SelectById,
    SelectByName,
    DeleteById,
    UpdateSalary,
    SortBySalary,
    MaxSalary,
    MinSalary,
    AverageSalary,
    Count,
    SelectByAgeRange,
    ExportCsv,
    Exit,
}

impl MenuOption {
    /// Menu order.
    pub const ALL: [MenuOption; 15] = [
        MenuOption::Insert,
        MenuOption::SelectAll,
        MenuOption::Backup,
        MenuOption::SelectById,
        MenuOption::SelectByName,
        MenuOption::DeleteById,
        MenuOption::UpdateSalary,
        MenuOption::SortBySalary,
        MenuOption::MaxSalary,
        MenuOption::MinSalary,
        MenuOption::AverageSalary,
        MenuOption::Count,
        MenuOption::SelectByAgeRange,
        MenuOption::ExportCsv,
        MenuOption::Exit,
    ];

    pub fn number(self) -> u32 {
        match self {
            MenuOption::Insert => 1,
            MenuOption::SelectAll => 2,
            MenuOption::Backup => 3,
            MenuOption::SelectById => 4,
            MenuOption::SelectByName => 5,
            MenuOption::DeleteById => 6,
            MenuOption::UpdateSalary => 7,
            MenuOption::SortBySalary => 8,
            MenuOption::MaxSalary => 9,
            MenuOption::MinSalary => 10,
            MenuOption::AverageSalary => 11,
            MenuOption::Count => 12,
            MenuOption::SelectByAgeRange => 13,
            MenuOption::ExportCsv => 14,
            MenuOption::Exit => 20,
        }
    }

    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Insert => "Insert new employee",
            MenuOption::SelectAll => "Select * from employee",
            MenuOption::Backup => "Take backup",
            MenuOption::SelectById => "Select by ID",
            MenuOption::SelectByName => "Select by Name",
            MenuOption::DeleteById => "Delete by ID",
            MenuOption::UpdateSalary => "Update salary by ID",
            MenuOption::SortBySalary => "Sort employees by salary",
            MenuOption::MaxSalary => "Show max salary",
            MenuOption::MinSalary => "Show min salary",
            MenuOption::AverageSalary => "Show average salary",
            MenuOption::Count => "Show total employees",
            MenuOption::SelectByAgeRange => "Search employees by age range",
            MenuOption::ExportCsv => "Export data to CSV",
            MenuOption::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<2} : {}", self.number(), self.label())
    }
}

impl FromStr for MenuOption {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u32 = parse_number(s)?;
        Self::from_number(number).ok_or(InputError::UnknownOption(number))
    }
}

/// Parse a trimmed integer argument.
pub fn parse_number<T: FromStr>(input: &str) -> Result<T, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_owned()))
}

/// Strip the line terminator from a text argument, keeping inner spacing.
pub fn parse_text(input: &str) -> String {
    input.trim_end_matches(['\r', '\n']).to_owned()
}
