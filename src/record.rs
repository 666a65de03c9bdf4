use std::fmt;

use serde::{Deserialize, Serialize};

/// A single employee row.
///
/// Records are only created by [`crate::Table::insert`], which assigns the
/// id. The salary is the only field that changes after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) age: i32,
    pub(crate) address: String,
    pub(crate) salary: i64,
}

impl Record {
    pub(crate) fn new(id: u64, name: String, age: i32, address: String, salary: i64) -> Self {
        Self {
            id,
            name,
            age,
            address,
            salary,
        }
    }

    /// Unique id assigned by the table.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn salary(&self) -> i64 {
        self.salary
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID : {} | Name : {} | Age : {} | Address : {} | Salary : {}",
            self.id, self.name, self.age, self.address, self.salary
        )
    }
}
