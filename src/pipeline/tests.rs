//! Tests for the pipeline module

use super::*;
use crate::error::{Error, Result};
use crate::types::{Beer, Page, PageIndex};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use test_case::test_case;

// ============================================================================
// Scripted fetcher
// ============================================================================

/// What a scripted page fetch should return
enum PageScript {
    Records(Vec<Beer>),
    Fail,
}

/// Fetcher that replays a fixed script and records every requested index.
/// Indices past the end of the script return an empty page.
struct ScriptedFetcher {
    script: Vec<PageScript>,
    calls: Mutex<Vec<PageIndex>>,
}

impl ScriptedFetcher {
    fn new(script: Vec<PageScript>) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<PageIndex> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    type Item = Beer;

    async fn fetch_page(&self, page: PageIndex) -> Result<Page<Beer>> {
        self.calls.lock().unwrap().push(page);
        match self.script.get((page - 1) as usize) {
            Some(PageScript::Records(beers)) => Ok(beers.clone()),
            Some(PageScript::Fail) => Err(Error::decode("scripted failure")),
            None => Ok(Vec::new()),
        }
    }
}

fn beer(name: &str, abv: f64) -> Beer {
    Beer::new(name, "test brew", abv)
}

fn strong(b: &Beer) -> bool {
    b.abv > 15.0
}

// ============================================================================
// Sequencer
// ============================================================================

#[tokio::test]
async fn test_sequencer_yields_terminal_empty_page() {
    let fetcher = ScriptedFetcher::new(vec![
        PageScript::Records(vec![beer("a", 5.0), beer("b", 6.0)]),
        PageScript::Records(vec![beer("c", 7.0)]),
    ]);

    let pages: Vec<Page<Beer>> = pages(fetcher.clone()).try_collect().await.unwrap();

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[1].len(), 1);
    assert!(pages[2].is_empty());
    assert_eq!(fetcher.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_sequencer_halts_after_fetch_error() {
    let fetcher = ScriptedFetcher::new(vec![
        PageScript::Records(vec![beer("a", 5.0)]),
        PageScript::Fail,
    ]);

    let mut stream = Box::pin(pages(fetcher.clone()));

    assert_eq!(stream.next().await.unwrap().unwrap().len(), 1);
    assert!(stream.next().await.unwrap().unwrap_err().is_fetch());
    assert!(stream.next().await.is_none());
    assert_eq!(fetcher.calls(), vec![1, 2]);
}

#[test]
fn test_sequencer_state() {
    let state = SequencerState::new();
    assert_eq!(state, SequencerState::Running { next_page: 1 });
    assert!(!state.is_terminal());
    assert!(SequencerState::Exhausted.is_terminal());
    assert!(SequencerState::Failed.is_terminal());
}

// ============================================================================
// Full pipeline
// ============================================================================

#[tokio::test]
async fn test_filtered_records_scenario() {
    let fetcher = ScriptedFetcher::new(vec![
        PageScript::Records(vec![beer("tnp", 55.0), beer("vice", 10.0)]),
        PageScript::Records(vec![beer("mash tun", 16.5)]),
    ]);

    let records: Vec<Beer> = filtered_records(fetcher.clone(), strong)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(records, vec![beer("tnp", 55.0), beer("mash tun", 16.5)]);
    assert_eq!(fetcher.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_empty_first_page_means_one_fetch() {
    let fetcher = ScriptedFetcher::new(vec![]);

    let records: Vec<Beer> = filtered_records(fetcher.clone(), strong)
        .try_collect()
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_always_false_predicate_still_exhausts_pages() {
    let fetcher = ScriptedFetcher::new(vec![
        PageScript::Records(vec![beer("a", 55.0)]),
        PageScript::Records(vec![beer("b", 60.0)]),
    ]);

    let records: Vec<Beer> = filtered_records(fetcher.clone(), |_| false)
        .try_collect()
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(fetcher.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_fetch_failure_surfaces_after_earlier_records() {
    let fetcher = ScriptedFetcher::new(vec![
        PageScript::Records(vec![beer("a", 20.0), beer("b", 5.0)]),
        PageScript::Fail,
    ]);

    let mut stream = Box::pin(filtered_records(fetcher.clone(), strong));

    assert_eq!(stream.next().await.unwrap().unwrap(), beer("a", 20.0));
    assert!(stream.next().await.unwrap().unwrap_err().is_fetch());
    assert!(stream.next().await.is_none());
    // No fetch for the page after the failing one
    assert_eq!(fetcher.calls(), vec![1, 2]);
}

// ============================================================================
// Backpressure / laziness
// ============================================================================

#[tokio::test]
async fn test_next_page_not_fetched_until_current_drained() {
    let fetcher = ScriptedFetcher::new(vec![
        PageScript::Records(vec![beer("a", 20.0), beer("b", 21.0)]),
        PageScript::Records(vec![beer("c", 22.0)]),
    ]);

    let mut stream = Box::pin(filtered_records(fetcher.clone(), strong));

    assert_eq!(stream.next().await.unwrap().unwrap(), beer("a", 20.0));
    assert_eq!(fetcher.calls(), vec![1]);

    assert_eq!(stream.next().await.unwrap().unwrap(), beer("b", 21.0));
    assert_eq!(fetcher.calls(), vec![1]);

    assert_eq!(stream.next().await.unwrap().unwrap(), beer("c", 22.0));
    assert_eq!(fetcher.calls(), vec![1, 2]);

    assert!(stream.next().await.is_none());
    assert_eq!(fetcher.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_dropped_consumer_stops_fetching() {
    let fetcher = ScriptedFetcher::new(vec![
        PageScript::Records(vec![beer("a", 20.0)]),
        PageScript::Records(vec![beer("b", 21.0)]),
    ]);

    {
        let mut stream = Box::pin(filtered_records(fetcher.clone(), strong));
        assert_eq!(stream.next().await.unwrap().unwrap(), beer("a", 20.0));
    }

    assert_eq!(fetcher.calls(), vec![1]);
}

// ============================================================================
// Filter
// ============================================================================

#[test_case(15.0, &["tnp", "mash tun"] ; "default threshold")]
#[test_case(50.0, &["tnp"] ; "high threshold")]
#[test_case(0.0, &["tnp", "vice", "mash tun"] ; "zero threshold")]
#[tokio::test]
async fn test_filter_thresholds(min_abv: f64, expected: &[&str]) {
    let records = futures::stream::iter(
        vec![beer("tnp", 55.0), beer("vice", 10.0), beer("mash tun", 16.5)]
            .into_iter()
            .map(Ok),
    );

    let kept: Vec<Beer> = filter_records(records, move |b: &Beer| b.abv > min_abv)
        .try_collect()
        .await
        .unwrap();

    let names: Vec<&str> = kept.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, expected);
}

// ============================================================================
// JSON array adapter
// ============================================================================

async fn collect_body<S>(chunks: S) -> Result<String>
where
    S: futures::Stream<Item = Result<bytes::Bytes>>,
{
    let parts: Vec<bytes::Bytes> = chunks.try_collect().await?;
    Ok(parts
        .iter()
        .map(|b| std::str::from_utf8(b).unwrap())
        .collect())
}

#[tokio::test]
async fn test_json_array_chunks_empty_stream() {
    let records = futures::stream::iter(Vec::<Result<Beer>>::new());
    let body = collect_body(json_array_chunks(records)).await.unwrap();
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_json_array_chunks_round_trips() {
    let beers = vec![beer("tnp", 55.0), beer("mash tun", 16.5)];
    let records = futures::stream::iter(beers.clone().into_iter().map(Ok));

    let body = collect_body(json_array_chunks(records)).await.unwrap();
    let decoded: Vec<Beer> = serde_json::from_str(&body).unwrap();
    assert_eq!(decoded, beers);
}

#[tokio::test]
async fn test_json_array_chunks_propagates_errors() {
    let records = futures::stream::iter(vec![
        Ok(beer("a", 20.0)),
        Err(Error::decode("scripted failure")),
    ]);

    let mut chunks = Box::pin(json_array_chunks(records));
    assert_eq!(chunks.next().await.unwrap().unwrap(), "[");
    assert!(chunks.next().await.unwrap().is_ok());
    assert!(chunks.next().await.unwrap().unwrap_err().is_fetch());
}
