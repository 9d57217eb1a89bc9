/// 画面遷移要求
///
/// 各操作の結果として返され、ナビゲーションシェルが解釈する。
/// コアロジックは遷移先を値として返すのみで、画面の切り替えは行わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// 明細一覧画面
    Bills,
    /// 新規明細作成画面
    NewBill,
}

impl Route {
    /// ナビゲーションシェルが使用するハッシュパスを返す
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }
}
