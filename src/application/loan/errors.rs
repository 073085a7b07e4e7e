use thiserror::Error;

/// 貸出ルール評価のエラー
///
/// 違反したルールごとに1つのバリアント。すべて事前条件の失敗であり、
/// 部分的な完了は発生しない（変更系の呼び出しは全チェック通過後に
/// 1回だけ実行されるため）。
#[derive(Debug, Error)]
pub enum LoanError {
    /// 書籍が既に貸出中
    #[error("book already loaned")]
    BookAlreadyLoaned,

    /// 会員が貸出上限（3冊）に達している
    #[error("member reached loan limit")]
    LoanLimitReached,

    /// 貸出記録がない、または記録上の借り手が要求した会員と異なる
    #[error("book not loaned by this member")]
    NotLoanedByMember,

    /// LoanStoreのエラー（サービス内で捕捉・再試行せず、そのまま伝播）
    #[error("loan store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LoanError>;
