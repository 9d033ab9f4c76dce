//! 入力補完ワーカー
//!
//! 入力変更イベントを受け取り、一定時間入力が止まってから検索する。
//! 検索はブロッキングスレッドで行い、その間に来た入力で古くなった結果は捨てる。
//!
//! ## 処理フロー
//! 1. `InputEvent::Changed` で SearchSession からチケットを得る
//! 2. 静止時間（既定300ms）内に次の入力が来なければ検索
//! 3. 検索中に届いた入力を反映してから、チケットが最新なら結果を公開

use skin_log_common::{search, Catalog, CatalogRecord, SearchSession, SearchTicket};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// 入力イベント
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// 入力欄のテキストが変わった
    Changed(String),
    /// 候補が選択された
    Selected(CatalogRecord),
}

/// 公開される候補一覧
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub seq: u64,
    pub query: String,
    pub results: Vec<CatalogRecord>,
}

pub struct SuggestionWorker {
    input: mpsc::UnboundedSender<InputEvent>,
    output: watch::Receiver<Suggestions>,
    handle: JoinHandle<()>,
}

impl SuggestionWorker {
    /// ワーカーを起動する（tokioランタイム内で呼ぶ）
    pub fn spawn(catalog: Arc<Catalog>, quiet: Duration) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let (tx, output) = watch::channel(Suggestions::default());
        let handle = tokio::spawn(run(catalog, quiet, rx, tx));

        Self {
            input,
            output,
            handle,
        }
    }

    /// テキスト変更を通知
    pub fn push(&self, query: impl Into<String>) -> bool {
        self.input.send(InputEvent::Changed(query.into())).is_ok()
    }

    /// 候補の選択を通知
    pub fn select(&self, record: CatalogRecord) -> bool {
        self.input.send(InputEvent::Selected(record)).is_ok()
    }

    /// 候補の購読
    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.output.clone()
    }

    /// 入力を閉じ、待機中の検索を実行してから終了する
    pub async fn finish(self) {
        drop(self.input);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "suggestion worker terminated abnormally");
        }
    }
}

async fn run(
    catalog: Arc<Catalog>,
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<InputEvent>,
    tx: watch::Sender<Suggestions>,
) {
    let mut session = SearchSession::new();
    let mut pending: Option<SearchTicket> = None;

    loop {
        let event = if pending.is_some() {
            match tokio::time::timeout(quiet, rx.recv()).await {
                Ok(event) => event,
                Err(_) => {
                    // 静止時間経過
                    if let Some(ticket) = pending.take() {
                        run_search(&catalog, ticket, &mut session, &mut rx, &tx, &mut pending).await;
                    }
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        let Some(event) = event else {
            if let Some(ticket) = pending.take() {
                run_search(&catalog, ticket, &mut session, &mut rx, &tx, &mut pending).await;
            }
            break;
        };

        handle_event(event, &mut session, &tx, &mut pending);
    }

    debug!("suggestion worker stopped");
}

fn handle_event(
    event: InputEvent,
    session: &mut SearchSession,
    tx: &watch::Sender<Suggestions>,
    pending: &mut Option<SearchTicket>,
) {
    let had_results = !session.results().is_empty();

    match event {
        InputEvent::Changed(query) => {
            *pending = session.on_query_change(&query);
        }
        InputEvent::Selected(record) => {
            session.select(&record);
            *pending = None;
        }
    }

    // 候補が閉じられた
    if had_results && session.results().is_empty() {
        tx.send_replace(Suggestions::default());
    }
}

async fn run_search(
    catalog: &Arc<Catalog>,
    ticket: SearchTicket,
    session: &mut SearchSession,
    rx: &mut mpsc::UnboundedReceiver<InputEvent>,
    tx: &watch::Sender<Suggestions>,
    pending: &mut Option<SearchTicket>,
) {
    let catalog = Arc::clone(catalog);
    let query = ticket.query.clone();
    let joined = tokio::task::spawn_blocking(move || {
        search(&query, catalog.records())
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    })
    .await;

    let results = match joined {
        Ok(results) => results,
        Err(e) => {
            warn!(error = %e, query = %ticket.query, "search task failed");
            return;
        }
    };

    // 検索中に届いた入力を先に反映する
    while let Ok(event) = rx.try_recv() {
        handle_event(event, session, tx, pending);
    }

    let count = results.len();
    if session.accept(&ticket, results) {
        debug!(query = %ticket.query, results = count, "suggestions published");
        tx.send_replace(Suggestions {
            seq: ticket.seq(),
            query: ticket.query.clone(),
            results: session.results().to_vec(),
        });
    } else {
        debug!(query = %ticket.query, "superseded search discarded");
    }
}

/// 標準入力の1行を1回の入力変更として扱い、候補を標準出力に表示する
pub async fn run_stdin(catalog: Arc<Catalog>, quiet: Duration) -> std::io::Result<()> {
    use tokio::io::{AsyncBufReadExt, BufReader};

    let worker = SuggestionWorker::spawn(catalog, quiet);
    let mut updates = worker.subscribe();

    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let current = updates.borrow_and_update().clone();
            print_suggestions(&current);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !worker.push(line) {
            break;
        }
    }

    worker.finish().await;
    // ワーカー終了で送信側が閉じ、printer も抜ける
    if let Err(e) = printer.await {
        warn!(error = %e, "printer task failed");
    }
    Ok(())
}

fn print_suggestions(suggestions: &Suggestions) {
    if suggestions.query.is_empty() {
        return;
    }
    if suggestions.results.is_empty() {
        println!("「{}」: 該当なし（手動で入力してください）", suggestions.query);
        return;
    }

    println!("「{}」: {}件", suggestions.query, suggestions.results.len());
    for (i, record) in suggestions.results.iter().enumerate() {
        if record.product_type.is_empty() {
            println!("  {:>2}) {} {}", i + 1, record.brand, record.name);
        } else {
            println!("  {:>2}) {} {} ({})", i + 1, record.brand, record.name, record.product_type);
        }
    }
}
