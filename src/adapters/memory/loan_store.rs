use crate::domain::value_objects::{Book, BookId, Member, MemberId};
use crate::ports::loan_store::{LoanStore as LoanStoreTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory implementation of LoanStore
///
/// Keeps active loans as a book-id to member-id map behind a single mutex,
/// which upholds the at-most-one-loan-per-book invariant by construction.
/// Each operation is serialized on its own; a deployment with concurrent
/// callers racing the service's check-then-act sequences needs a store that
/// serializes the whole sequence per book or member.
pub struct InMemoryLoanStore {
    loans: Mutex<HashMap<BookId, MemberId>>,
}

impl InMemoryLoanStore {
    pub fn new() -> Self {
        Self {
            loans: Mutex::new(HashMap::new()),
        }
    }

    /// Seed an active loan directly, bypassing the service rules
    ///
    /// Intended for test setup.
    pub fn preload_loan(&self, book_id: BookId, member_id: MemberId) {
        self.loans.lock().unwrap().insert(book_id, member_id);
    }
}

impl Default for InMemoryLoanStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanStoreTrait for InMemoryLoanStore {
    async fn is_book_loaned(&self, book: &Book) -> Result<bool> {
        Ok(self.loans.lock().unwrap().contains_key(&book.id))
    }

    async fn count_loans_by_member(&self, member: &Member) -> Result<usize> {
        let loans = self.loans.lock().unwrap();
        Ok(loans.values().filter(|id| **id == member.id).count())
    }

    async fn save_loan(&self, book: &Book, member: &Member) -> Result<()> {
        self.loans
            .lock()
            .unwrap()
            .insert(book.id.clone(), member.id.clone());
        Ok(())
    }

    async fn find_loaner_of(&self, book: &Book) -> Result<Option<MemberId>> {
        Ok(self.loans.lock().unwrap().get(&book.id).cloned())
    }

    async fn remove_loan(&self, book: &Book) -> Result<()> {
        self.loans.lock().unwrap().remove(&book.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_saved_loan_is_visible() {
        let store = InMemoryLoanStore::new();
        let book = Book::new("1", "Clean Code");
        let member = Member::new("101", "Alice");

        assert!(!store.is_book_loaned(&book).await.unwrap());

        store.save_loan(&book, &member).await.unwrap();

        assert!(store.is_book_loaned(&book).await.unwrap());
        assert_eq!(
            store.find_loaner_of(&book).await.unwrap(),
            Some(MemberId::new("101"))
        );
    }

    #[tokio::test]
    async fn test_count_loans_only_counts_that_member() {
        let store = InMemoryLoanStore::new();
        let alice = Member::new("101", "Alice");
        let bob = Member::new("102", "Bob");

        store
            .save_loan(&Book::new("1", "Clean Code"), &alice)
            .await
            .unwrap();
        store
            .save_loan(&Book::new("2", "The Pragmatic Programmer"), &alice)
            .await
            .unwrap();
        store
            .save_loan(&Book::new("3", "Refactoring"), &bob)
            .await
            .unwrap();

        assert_eq!(store.count_loans_by_member(&alice).await.unwrap(), 2);
        assert_eq!(store.count_loans_by_member(&bob).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_loan_clears_the_association() {
        let store = InMemoryLoanStore::new();
        let book = Book::new("1", "Clean Code");
        let member = Member::new("101", "Alice");

        store.save_loan(&book, &member).await.unwrap();
        store.remove_loan(&book).await.unwrap();

        assert!(!store.is_book_loaned(&book).await.unwrap());
        assert_eq!(store.find_loaner_of(&book).await.unwrap(), None);
        assert_eq!(store.count_loans_by_member(&member).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_preload_loan_seeds_an_active_loan() {
        let store = InMemoryLoanStore::new();
        store.preload_loan(BookId::new("2"), MemberId::new("999"));

        let book = Book::new("2", "The Pragmatic Programmer");
        assert!(store.is_book_loaned(&book).await.unwrap());
        assert_eq!(
            store.find_loaner_of(&book).await.unwrap(),
            Some(MemberId::new("999"))
        );
    }
}
