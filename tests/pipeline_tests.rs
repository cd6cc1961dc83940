use catscan::catalog::{
    CatalogClient, CatalogError, DescriptiveMetadata, SystemMetadata,
};
use catscan::classify::{Classifier, KeywordClassifier};
use catscan::pipeline::{
    Task, create_stage_channels, enumerate_items, join_pool, run_scan, scan_items, seed_tasks,
    spawn_workers,
};
use catscan::types::{DateRange, ItemId, ItemSummary, ScanOpts};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_opts(workers: usize) -> ScanOpts {
    ScanOpts {
        num_workers: Some(workers),
        partitions: 8,
        fetch_timeout: Duration::from_secs(2),
        earliest: date(2020, 1, 1),
        progress: false,
    }
}

// --- stub catalog ---

#[derive(Clone)]
struct StubItem {
    created: NaiveDate,
    public: bool,
    title: Option<String>,
    fetch_delay: Option<Duration>,
}

impl StubItem {
    fn public(created: NaiveDate, title: &str) -> Self {
        Self {
            created,
            public: true,
            title: Some(title.to_string()),
            fetch_delay: None,
        }
    }

    fn private(created: NaiveDate) -> Self {
        Self {
            created,
            public: false,
            title: None,
            fetch_delay: None,
        }
    }
}

/// In-memory catalog. BTreeMap so enumeration order is stable per range.
struct StubCatalog {
    items: BTreeMap<String, StubItem>,
    ranges_seen: Mutex<Vec<DateRange>>,
}

impl StubCatalog {
    fn new(items: Vec<(&str, StubItem)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(id, item)| (id.to_string(), item))
                .collect(),
            ranges_seen: Mutex::new(Vec::new()),
        }
    }

    fn get(&self, id: &ItemId) -> Result<&StubItem, CatalogError> {
        self.items
            .get(id.as_str())
            .ok_or_else(|| CatalogError::Transport(format!("unknown item {}", id)))
    }
}

impl CatalogClient for StubCatalog {
    fn items_in_range(&self, range: &DateRange) -> Result<Vec<ItemSummary>, CatalogError> {
        self.ranges_seen.lock().unwrap().push(*range);
        Ok(self
            .items
            .iter()
            .filter(|(_, item)| item.created >= range.start && item.created < range.end)
            .map(|(id, _)| ItemSummary {
                id: ItemId::from(id.as_str()),
            })
            .collect())
    }

    fn system_metadata(&self, id: &ItemId) -> Result<SystemMetadata, CatalogError> {
        let item = self.get(id)?;
        if let Some(delay) = item.fetch_delay {
            thread::sleep(delay);
        }
        Ok(SystemMetadata {
            public: item.public,
        })
    }

    fn descriptive_metadata(&self, id: &ItemId) -> Result<DescriptiveMetadata, CatalogError> {
        match &self.get(id)?.title {
            Some(title) => Ok(DescriptiveMetadata {
                title: title.clone(),
            }),
            None => Err(CatalogError::Malformed {
                id: id.clone(),
                reason: "missing title".to_string(),
            }),
        }
    }
}

/// Catalog whose metadata calls always fail at the transport level.
struct BrokenCatalog;

impl CatalogClient for BrokenCatalog {
    fn items_in_range(&self, _range: &DateRange) -> Result<Vec<ItemSummary>, CatalogError> {
        Err(CatalogError::Transport("connection refused".to_string()))
    }

    fn system_metadata(&self, _id: &ItemId) -> Result<SystemMetadata, CatalogError> {
        Err(CatalogError::Transport("connection refused".to_string()))
    }

    fn descriptive_metadata(&self, _id: &ItemId) -> Result<DescriptiveMetadata, CatalogError> {
        Err(CatalogError::Transport("connection refused".to_string()))
    }
}

// --- worker pool ---

#[test]
fn test_pool_stop_tokens_terminate_all_workers() {
    let workers = 4;
    let channels = create_stage_channels::<u32, u32>(0, workers);
    let handles = spawn_workers(
        "idle",
        channels.task_rx,
        channels.result_tx,
        workers,
        |n, tx| {
            let _ = tx.send(n);
            Ok(())
        },
    )
    .unwrap();
    seed_tasks(&channels.task_tx, Vec::new(), workers);
    drop(channels.task_tx);

    // would hang here if any worker missed its stop token
    let outcome = join_pool(handles);
    assert_eq!(outcome.completed, workers);
    assert!(outcome.failures.is_empty());
    assert!(channels.result_rx.recv().is_err());
}

#[test]
fn test_pool_consumes_each_task_exactly_once() {
    let workers = 4;
    let tasks: Vec<u32> = (0..100).collect();
    let channels = create_stage_channels::<u32, u32>(tasks.len(), workers);
    let handles = spawn_workers(
        "echo",
        channels.task_rx,
        channels.result_tx,
        workers,
        |n, tx| {
            let _ = tx.send(n);
            Ok(())
        },
    )
    .unwrap();
    seed_tasks(&channels.task_tx, tasks, workers);
    drop(channels.task_tx);

    let mut seen = Vec::new();
    while let Ok(n) = channels.result_rx.recv() {
        seen.push(n);
    }
    let outcome = join_pool(handles);
    assert_eq!(outcome.completed, workers);

    seen.sort_unstable();
    assert_eq!(seen, (0..100).collect::<Vec<u32>>());
}

#[test]
fn test_pool_worker_failure_surfaces_at_join() {
    let workers = 4;
    let tasks: Vec<u32> = vec![1, 2, 42, 3];
    let channels = create_stage_channels::<u32, u32>(tasks.len(), workers);
    let handles = spawn_workers(
        "flaky",
        channels.task_rx,
        channels.result_tx,
        workers,
        |n, tx| {
            if n == 42 {
                return Err(CatalogError::Transport("boom".to_string()));
            }
            let _ = tx.send(n);
            Ok(())
        },
    )
    .unwrap();
    seed_tasks(&channels.task_tx, tasks, workers);
    drop(channels.task_tx);

    let mut seen = Vec::new();
    while let Ok(n) = channels.result_rx.recv() {
        seen.push(n);
    }
    let outcome = join_pool(handles);
    assert_eq!(outcome.completed, workers - 1);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].contains("boom"));
    assert!(!outcome.all_failed());

    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
fn test_pool_stop_task_variant_is_terminal() {
    let workers = 1;
    let channels = create_stage_channels::<u32, u32>(2, workers);
    let handles = spawn_workers(
        "early-stop",
        channels.task_rx,
        channels.result_tx,
        workers,
        |n, tx| {
            let _ = tx.send(n);
            Ok(())
        },
    )
    .unwrap();
    // stop delivered before the work: the worker must not process anything after it
    channels.task_tx.send(Task::Stop).unwrap();
    channels.task_tx.send(Task::Work(7)).unwrap();
    drop(channels.task_tx);

    let mut seen = Vec::new();
    while let Ok(n) = channels.result_rx.recv() {
        seen.push(n);
    }
    assert!(seen.is_empty());
    assert_eq!(join_pool(handles).completed, 1);
}

// --- stage 1: enumeration ---

#[test]
fn test_enumerate_items_collects_every_id_once() {
    let catalog = Arc::new(StubCatalog::new(vec![
        ("a", StubItem::public(date(2020, 3, 1), "one")),
        ("b", StubItem::public(date(2021, 7, 15), "two")),
        ("c", StubItem::private(date(2022, 11, 30))),
        ("d", StubItem::public(date(2023, 2, 2), "three")),
    ]));
    let opts = test_opts(2);

    let mut ids = enumerate_items(Arc::clone(&catalog), &opts).unwrap();
    ids.sort();
    let got: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(got, vec!["a", "b", "c", "d"]);

    // every partition was queried
    assert_eq!(catalog.ranges_seen.lock().unwrap().len(), opts.partitions);
}

#[test]
fn test_enumerate_fails_when_all_workers_fail() {
    let catalog = Arc::new(BrokenCatalog);
    // more partitions than workers, so every worker sees at least one task
    let err = enumerate_items(catalog, &test_opts(2)).unwrap_err();
    assert!(err.to_string().contains("all 2 workers failed"));
}

// --- stage 2: scan ---

fn classifier() -> Arc<dyn Classifier> {
    Arc::new(KeywordClassifier::default())
}

#[test]
fn test_scan_items_end_to_end() {
    let catalog = Arc::new(StubCatalog::new(vec![
        ("A", StubItem::public(date(2021, 1, 1), "Vacation Packages")),
        ("B", StubItem::public(date(2021, 1, 2), "Water Quality Data")),
        ("C", StubItem::private(date(2021, 1, 3))),
    ]));
    let ids = vec![ItemId::from("A"), ItemId::from("B"), ItemId::from("C")];

    let matches = scan_items(catalog, classifier(), ids, &test_opts(2)).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, ItemId::from("A"));
    assert_eq!(matches[0].title, "Vacation Packages");
}

#[test]
fn test_scan_skips_timed_out_item_and_continues() {
    let slow = StubItem {
        created: date(2021, 1, 1),
        public: true,
        title: Some("Cheap Deals".to_string()),
        fetch_delay: Some(Duration::from_millis(400)),
    };
    let catalog = Arc::new(StubCatalog::new(vec![
        ("slow", slow),
        ("fast", StubItem::public(date(2021, 1, 2), "Vacation Packages")),
    ]));
    // one worker, slow item first: the same worker must survive the timeout
    // and go on to find the fast item
    let opts = ScanOpts {
        fetch_timeout: Duration::from_millis(50),
        ..test_opts(1)
    };
    let ids = vec![ItemId::from("slow"), ItemId::from("fast")];

    let matches = scan_items(catalog, classifier(), ids, &opts).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, ItemId::from("fast"));
}

#[test]
fn test_scan_treats_malformed_metadata_as_non_match() {
    let broken_title = StubItem {
        created: date(2021, 1, 1),
        public: true,
        title: None, // descriptive metadata fetch reports Malformed
        fetch_delay: None,
    };
    let catalog = Arc::new(StubCatalog::new(vec![
        ("broken", broken_title),
        ("ok", StubItem::public(date(2021, 1, 2), "Frontier airline sale")),
    ]));
    let ids = vec![ItemId::from("broken"), ItemId::from("ok")];

    let matches = scan_items(catalog, classifier(), ids, &test_opts(2)).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, ItemId::from("ok"));
}

#[test]
fn test_scan_private_items_never_fetch_titles() {
    let catalog = Arc::new(StubCatalog::new(vec![(
        "p",
        StubItem::private(date(2021, 1, 1)),
    )]));
    let matches = scan_items(catalog, classifier(), vec![ItemId::from("p")], &test_opts(2)).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_scan_fails_when_all_workers_fail() {
    let catalog = Arc::new(BrokenCatalog);
    let ids = vec![
        ItemId::from("a"),
        ItemId::from("b"),
        ItemId::from("c"),
        ItemId::from("d"),
    ];
    let err = scan_items(catalog, classifier(), ids, &test_opts(2)).unwrap_err();
    assert!(err.to_string().contains("all 2 workers failed"));
}

#[test]
fn test_scan_empty_id_list() {
    let catalog = Arc::new(StubCatalog::new(vec![]));
    let matches = scan_items(catalog, classifier(), Vec::new(), &test_opts(2)).unwrap();
    assert!(matches.is_empty());
}

// --- full pipeline ---

#[test]
fn test_run_scan_composes_both_stages() {
    let catalog = Arc::new(StubCatalog::new(vec![
        ("A", StubItem::public(date(2021, 1, 1), "Vacation Packages")),
        ("B", StubItem::public(date(2022, 6, 1), "Water Quality Data")),
        ("C", StubItem::private(date(2023, 3, 1))),
        ("D", StubItem::public(date(2023, 9, 1), "Southwest deals")),
    ]));

    let mut matches = run_scan(catalog, classifier(), &test_opts(4)).unwrap();
    matches.sort_by(|a, b| a.id.cmp(&b.id));
    let got: Vec<(&str, &str)> = matches
        .iter()
        .map(|m| (m.id.as_str(), m.title.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![("A", "Vacation Packages"), ("D", "Southwest deals")]
    );
}
