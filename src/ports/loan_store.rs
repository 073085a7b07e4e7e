use crate::domain::value_objects::{Book, Member, MemberId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出ストアポート
///
/// 貸出（書籍と会員の有効な関連）の永続化と照会を抽象化する。
/// インメモリマップ、リレーショナルテーブル、リモートサービスなど、
/// この契約を満たす実装であればサービスを変更せずに差し替え可能。
///
/// 不変条件: 1冊の書籍に対して同時に有効な貸出は最大1件。
/// 会員ごとの貸出上限はストアの不変条件ではなく、サービス層で強制される。
///
/// サービスはロックを行わないため、照会→書き込みの一連の操作の
/// 原子性はストア実装の責務。並行利用する実装は書籍・会員単位で
/// この一連の操作を直列化すること（トランザクションやロックなど）。
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// 書籍に有効な貸出が存在するか確認する
    async fn is_book_loaned(&self, book: &Book) -> Result<bool>;

    /// 会員が現在保持している有効な貸出の件数を返す
    ///
    /// 貸出上限（会員ごと最大3冊）の確認に使用される。
    async fn count_loans_by_member(&self, member: &Member) -> Result<usize>;

    /// 新しい貸出を保存する
    ///
    /// 事前条件（未貸出・上限未満）の確認は呼び出し側（サービス）が保証する。
    async fn save_loan(&self, book: &Book, member: &Member) -> Result<()>;

    /// 書籍を現在借りている会員のIDを返す
    ///
    /// 未貸出の場合はNone。
    async fn find_loaner_of(&self, book: &Book) -> Result<Option<MemberId>>;

    /// 書籍の有効な貸出を削除する
    async fn remove_loan(&self, book: &Book) -> Result<()>;
}
