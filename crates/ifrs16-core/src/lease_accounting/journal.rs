//! Double-entry journals for a lessee under IFRS 16.
//!
//! Entries are produced as structured data against a small chart of
//! accounts. Turning them into text is left to the presentation layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::ScheduleRow;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Chart of accounts
// ---------------------------------------------------------------------------

/// Nominal accounts touched by lease accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Account {
    RightOfUseAsset,
    LeaseLiability,
    DepreciationExpense,
    InterestExpense,
    Bank,
}

/// Where an account is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCategory {
    NonCurrentAsset,
    NonCurrentLiability,
    Expense,
    FinanceCost,
    Asset,
}

impl Account {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RightOfUseAsset => "1150",
            Self::LeaseLiability => "2100",
            Self::DepreciationExpense => "7000",
            Self::InterestExpense => "7500",
            Self::Bank => "1000",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RightOfUseAsset => "Right-of-Use Asset",
            Self::LeaseLiability => "Lease Liability",
            Self::DepreciationExpense => "Depreciation Expense",
            Self::InterestExpense => "Interest Expense",
            Self::Bank => "Bank",
        }
    }

    pub fn category(&self) -> AccountCategory {
        match self {
            Self::RightOfUseAsset => AccountCategory::NonCurrentAsset,
            Self::LeaseLiability => AccountCategory::NonCurrentLiability,
            Self::DepreciationExpense => AccountCategory::Expense,
            Self::InterestExpense => AccountCategory::FinanceCost,
            Self::Bank => AccountCategory::Asset,
        }
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.name())
    }
}

/// Flattened chart-of-accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub code: String,
    pub name: String,
    pub category: AccountCategory,
}

/// The accounts used by lease journals, in ledger order.
pub fn chart_of_accounts() -> Vec<AccountInfo> {
    [
        Account::RightOfUseAsset,
        Account::LeaseLiability,
        Account::DepreciationExpense,
        Account::InterestExpense,
        Account::Bank,
    ]
    .iter()
    .map(|a| AccountInfo {
        code: a.code().to_string(),
        name: a.name().to_string(),
        category: a.category(),
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Journal types
// ---------------------------------------------------------------------------

/// Figures needed to post one year of a lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryValues {
    pub interest_expense: Money,
    pub principal_portion: Money,
    pub payment: Money,
    pub depreciation: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntrySide {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account: Account,
    pub side: EntrySide,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl JournalLine {
    fn debit(account: Account, amount: Money) -> Self {
        Self {
            account,
            side: EntrySide::Debit,
            amount,
            memo: None,
        }
    }

    fn credit(account: Account, amount: Money) -> Self {
        Self {
            account,
            side: EntrySide::Credit,
            amount,
            memo: None,
        }
    }

    fn with_memo(mut self, memo: &str) -> Self {
        self.memo = Some(memo.to_string());
        self
    }
}

/// A balanced set of journal lines posted together. Year 0 is commencement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub year: u32,
    pub description: String,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub fn total_debits(&self) -> Money {
        self.side_total(EntrySide::Debit)
    }

    pub fn total_credits(&self) -> Money {
        self.side_total(EntrySide::Credit)
    }

    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    fn side_total(&self, side: EntrySide) -> Money {
        self.lines
            .iter()
            .filter(|l| l.side == side)
            .map(|l| l.amount)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project a schedule row and the depreciation charge onto the four
/// figures a year's journals need.
pub fn derive_journal_values(row: &ScheduleRow, depreciation: Money) -> JournalEntryValues {
    JournalEntryValues {
        interest_expense: row.interest,
        principal_portion: row.principal_repaid,
        payment: row.payment,
        depreciation,
    }
}

/// Initial recognition: ROU asset against the lease liability, with initial
/// direct costs paid from bank. `right_of_use_asset_cost` is the checked sum
/// of the other two figures.
pub fn commencement_entry(
    present_value: Money,
    initial_direct_costs: Money,
    right_of_use_asset_cost: Money,
) -> JournalEntry {
    let mut lines = vec![
        JournalLine::debit(Account::RightOfUseAsset, right_of_use_asset_cost),
        JournalLine::credit(Account::LeaseLiability, present_value),
    ];
    if initial_direct_costs > Decimal::ZERO {
        lines.push(
            JournalLine::credit(Account::Bank, initial_direct_costs)
                .with_memo("Initial direct costs"),
        );
    }

    JournalEntry {
        year: 0,
        description: "Lease commencement".to_string(),
        lines,
    }
}

/// The payment and depreciation journals for one year.
pub fn periodic_entries(year: u32, values: &JournalEntryValues) -> [JournalEntry; 2] {
    let payment = JournalEntry {
        year,
        description: "Lease payment".to_string(),
        lines: vec![
            JournalLine::debit(Account::InterestExpense, values.interest_expense),
            JournalLine::debit(Account::LeaseLiability, values.principal_portion)
                .with_memo("Principal"),
            JournalLine::credit(Account::Bank, values.payment).with_memo("Lease payment"),
        ],
    };

    let depreciation = JournalEntry {
        year,
        description: "Right-of-use asset depreciation".to_string(),
        lines: vec![
            JournalLine::debit(Account::DepreciationExpense, values.depreciation),
            JournalLine::credit(Account::RightOfUseAsset, values.depreciation)
                .with_memo("Accumulated depreciation"),
        ],
    };

    [payment, depreciation]
}
