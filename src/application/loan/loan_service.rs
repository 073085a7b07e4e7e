use crate::domain::value_objects::{Book, Member};
use crate::ports::LoanStore;
use std::sync::Arc;

use super::errors::{LoanError, Result};

/// 会員1人あたりの最大貸出冊数
pub const MAX_LOANS_PER_MEMBER: usize = 3;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
///
/// サービス自体は状態を持たないため、ラップするLoanStoreが
/// 並行利用に安全であれば、1つのインスタンスを共有してよい。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub loan_store: Arc<dyn LoanStore>,
}

/// 書籍を貸し出す
///
/// ビジネスルール（この順で評価し、最初の違反で打ち切る）：
/// - 書籍が貸出中でないこと
/// - 会員の貸出中の冊数が3冊未満であること
///
/// 変更系の呼び出しはsave_loanの1回のみ。両方のチェックを通過した
/// 後にだけ実行され、失敗時にストアへの変更は一切発生しない。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `book` - 貸し出す書籍
/// * `member` - 借りる会員
pub async fn borrow_book(deps: &ServiceDependencies, book: &Book, member: &Member) -> Result<()> {
    // 1. 書籍が既に貸出中か確認
    let already_loaned = deps
        .loan_store
        .is_book_loaned(book)
        .await
        .map_err(LoanError::StoreError)?;

    if already_loaned {
        tracing::debug!(
            book_id = book.id.value(),
            "borrow rejected: book already loaned"
        );
        return Err(LoanError::BookAlreadyLoaned);
    }

    // 2. 会員が貸出上限に達していないか確認
    let active_loans = deps
        .loan_store
        .count_loans_by_member(member)
        .await
        .map_err(LoanError::StoreError)?;

    if active_loans >= MAX_LOANS_PER_MEMBER {
        tracing::debug!(
            member_id = member.id.value(),
            active_loans,
            "borrow rejected: member reached loan limit"
        );
        return Err(LoanError::LoanLimitReached);
    }

    // 3. すべてのチェックを通過したら貸出を保存（唯一の変更系呼び出し）
    deps.loan_store
        .save_loan(book, member)
        .await
        .map_err(LoanError::StoreError)?;

    tracing::info!(
        book_id = book.id.value(),
        member_id = member.id.value(),
        "book loaned"
    );

    Ok(())
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 書籍に貸出記録が存在すること
/// - 記録上の借り手が返却を要求した会員本人であること
///
/// 変更系の呼び出しはremove_loanの1回のみ。チェック通過後にだけ
/// 実行され、失敗時にストアへの変更は一切発生しない。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `book` - 返却する書籍
/// * `member` - 返却を要求した会員
pub async fn return_book(deps: &ServiceDependencies, book: &Book, member: &Member) -> Result<()> {
    // 1. 現在の借り手を照会
    let loaner_id = deps
        .loan_store
        .find_loaner_of(book)
        .await
        .map_err(LoanError::StoreError)?;

    // 2. 貸出記録が存在し、借り手が本人であることを確認
    match loaner_id {
        Some(id) if id == member.id => {}
        _ => {
            tracing::debug!(
                book_id = book.id.value(),
                member_id = member.id.value(),
                "return rejected: book not loaned by this member"
            );
            return Err(LoanError::NotLoanedByMember);
        }
    }

    // 3. 貸出を削除（唯一の変更系呼び出し）
    deps.loan_store
        .remove_loan(book)
        .await
        .map_err(LoanError::StoreError)?;

    tracing::info!(
        book_id = book.id.value(),
        member_id = member.id.value(),
        "book returned"
    );

    Ok(())
}
