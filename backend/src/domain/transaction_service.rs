use log::{debug, info};
use shared::{FinancialSummary, Transaction};

use super::aggregations;
use super::commands::transactions::CreateTransactionCommand;
use super::errors::StoreResult;
use super::ids::IdGenerator;
use super::seed;
use super::validation;
use super::StoreContext;
use crate::storage::{keys, Collection};

/// Service for the income/expense ledger. Transactions are append-only.
#[derive(Clone)]
pub struct TransactionService {
    transactions: Collection<Transaction>,
    ids: IdGenerator,
}

impl TransactionService {
    pub fn new(context: &StoreContext) -> Self {
        let transactions = Collection::load(
            keys::TRANSACTIONS,
            context.persistence.clone(),
            context.version.clone(),
            seed::transactions,
        );
        Self {
            transactions,
            ids: context.ids.clone(),
        }
    }

    /// Record a transaction
    pub fn add(&self, command: CreateTransactionCommand) -> StoreResult<Transaction> {
        info!(
            "Adding transaction: type={}, amount={}, date={}",
            command.transaction_type, command.amount, command.date
        );

        let transaction = Transaction {
            id: self.ids.next_id(),
            transaction_type: command.transaction_type,
            amount: validation::amount(command.amount)?,
            description: validation::required_text("Description", &command.description)?,
            date: command.date,
            category: validation::required_text("Category", &command.category)?,
        };

        self.transactions.push(transaction.clone());
        info!("Added transaction with ID: {}", transaction.id);

        Ok(transaction)
    }

    pub fn list(&self) -> Vec<Transaction> {
        debug!("Listing all transactions");
        self.transactions.all()
    }

    pub fn balance(&self) -> f64 {
        self.transactions
            .with_records(aggregations::financial_balance)
    }

    pub fn summary(&self) -> FinancialSummary {
        self.transactions
            .with_records(aggregations::financial_summary)
    }

    pub(crate) fn collection(&self) -> &Collection<Transaction> {
        &self.transactions
    }
}
