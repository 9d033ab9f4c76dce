//! 対話式エントリ入力モジュール
//!
//! カタログ検索で製品名・ブランド・カテゴリを自動入力し、
//! 評価とメモを聞いて下書きを完成させる。

use crate::error::{Result, SkinLogError};
use dialoguer::{Confirm, Input, Select};
use skin_log_common::{
    search, Catalog, CatalogRecord, CategoryTag, EntryDraft, Rating, SearchSession, MIN_QUERY_CHARS,
};

/// 候補選択画面の操作
pub enum PickAction {
    /// 候補を選択
    Pick(usize),
    /// 検索し直す
    Retry,
    /// 手動で入力
    Manual,
}

/// 候補の表示ラベル
pub fn candidate_label(record: &CatalogRecord) -> String {
    if record.product_type.is_empty() {
        format!("{} {}", record.brand, record.name)
    } else {
        format!("{} {} ({})", record.brand, record.name, record.product_type)
    }
}

/// 候補選択肢の末尾に付く操作
const EXTRA_ITEMS: [&str; 2] = ["↺ 検索し直す", "✎ 手動で入力"];

/// Selectの戻り値を操作に変換
pub fn pick_action(index: usize, candidates: usize) -> PickAction {
    if index < candidates {
        PickAction::Pick(index)
    } else if index == candidates {
        PickAction::Retry
    } else {
        PickAction::Manual
    }
}

pub fn category_index(category: CategoryTag) -> usize {
    CategoryTag::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0)
}

pub fn rating_index(rating: Rating) -> usize {
    Rating::ALL.iter().position(|r| *r == rating).unwrap_or(0)
}

fn prompt_err(e: dialoguer::Error) -> SkinLogError {
    SkinLogError::Prompt(e.to_string())
}

/// 対話式で下書きを作成する。キャンセル時は None
pub fn run_interactive_add(catalog: &Catalog, mut draft: EntryDraft) -> Result<Option<EntryDraft>> {
    if catalog.is_empty() {
        println!("⚠ カタログが空です。製品情報を手動で入力してください");
        draft.product_name = prompt_text("製品名", &draft.product_name, false)?;
    } else {
        search_and_fill(catalog, &mut draft)?;
    }

    draft.brand = prompt_text("ブランド", &draft.brand, true)?;

    let labels: Vec<&str> = CategoryTag::ALL.iter().map(|c| c.label()).collect();
    let category = Select::new()
        .with_prompt("カテゴリ")
        .items(&labels)
        .default(category_index(draft.category))
        .interact()
        .map_err(prompt_err)?;
    draft.category = CategoryTag::ALL[category];

    let labels: Vec<&str> = Rating::ALL.iter().map(|r| r.label()).collect();
    let rating = Select::new()
        .with_prompt("評価")
        .items(&labels)
        .default(rating_index(draft.rating))
        .interact()
        .map_err(prompt_err)?;
    draft.rating = Rating::ALL[rating];

    draft.notes = prompt_text("メモ", &draft.notes, true)?;

    let confirmed = Confirm::new()
        .with_prompt(format!("「{}」を登録しますか？", draft.product_name))
        .default(true)
        .interact()
        .map_err(prompt_err)?;

    Ok(confirmed.then_some(draft))
}

/// カタログ検索で製品名・ブランド・カテゴリを埋める
fn search_and_fill(catalog: &Catalog, draft: &mut EntryDraft) -> Result<()> {
    let mut session = SearchSession::new();

    loop {
        let query = prompt_text("製品を検索（空でEnterなら手動入力）", "", true)?;
        if query.trim().is_empty() {
            draft.product_name = prompt_text("製品名", &draft.product_name, false)?;
            return Ok(());
        }

        let Some(ticket) = session.on_query_change(&query) else {
            println!("  {}文字以上入力してください", MIN_QUERY_CHARS);
            continue;
        };

        let results: Vec<CatalogRecord> = search(&ticket.query, catalog.records())
            .into_iter()
            .cloned()
            .collect();
        session.accept(&ticket, results);

        if session.results().is_empty() {
            println!("  該当する製品がありません。別のキーワードか手動入力を試してください");
            continue;
        }

        let mut items: Vec<String> = session.results().iter().map(candidate_label).collect();
        items.extend(EXTRA_ITEMS.iter().map(|s| s.to_string()));

        let index = Select::new()
            .with_prompt("候補")
            .items(&items)
            .default(0)
            .max_length(12)
            .interact()
            .map_err(prompt_err)?;

        match pick_action(index, session.results().len()) {
            PickAction::Pick(i) => {
                if let Some(suggestion) = session.select_index(i) {
                    suggestion.apply_to(draft);
                    println!("  → {} / {}", draft.brand, draft.product_name);
                }
                return Ok(());
            }
            PickAction::Retry => continue,
            PickAction::Manual => {
                draft.product_name = prompt_text("製品名", &draft.product_name, false)?;
                return Ok(());
            }
        }
    }
}

fn prompt_text(prompt: &str, initial: &str, allow_empty: bool) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(prompt_err)?;
    Ok(input.trim().to_string())
}
