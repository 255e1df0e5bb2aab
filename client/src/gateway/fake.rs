//! Recording in-memory gateway for unit tests

use super::{AnalysisReport, EntryDraft, EntryGateway, EntryId, MoodEntry};
use crate::catalog;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Create,
    Update,
    Delete,
    Analysis,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(EntryDraft),
    Update(EntryId, EntryDraft),
    Delete(EntryId),
    Analysis,
}

impl Call {
    fn op(&self) -> Op {
        match self {
            Call::List => Op::List,
            Call::Create(_) => Op::Create,
            Call::Update(..) => Op::Update,
            Call::Delete(_) => Op::Delete,
            Call::Analysis => Op::Analysis,
        }
    }
}

#[derive(Default)]
struct Inner {
    entries: Vec<MoodEntry>,
    next_id: EntryId,
    calls: Vec<Call>,
    failing: HashSet<Op>,
    gates: HashMap<Op, Arc<Semaphore>>,
    analysis: Option<AnalysisReport>,
}

#[derive(Default)]
pub struct FakeGateway {
    inner: Mutex<Inner>,
}

pub fn sample_entry(id: EntryId, mood: &str, note: &str) -> MoodEntry {
    MoodEntry {
        id,
        mood: mood.to_string(),
        note: note.to_string(),
        color: catalog::find(mood).map(|o| o.color).unwrap_or("#3B82F6").to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + chrono::Duration::hours(id),
    }
}

impl FakeGateway {
    pub fn with_entries(entries: Vec<MoodEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                entries,
                next_id,
                ..Inner::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .count()
    }

    pub fn entries(&self) -> Vec<MoodEntry> {
        self.inner.lock().unwrap().entries.clone()
    }

    pub fn set_entries(&self, entries: Vec<MoodEntry>) {
        self.inner.lock().unwrap().entries = entries;
    }

    /// Make every call of `op` fail until `recover` is called
    pub fn fail(&self, op: Op) {
        self.inner.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.inner.lock().unwrap().failing.remove(&op);
    }

    pub fn set_analysis(&self, report: AnalysisReport) {
        self.inner.lock().unwrap().analysis = Some(report);
    }

    /// Hold the next call of `op` until a permit is added to the returned gate.
    /// The call's result is computed before it starts waiting.
    pub fn gate_next(&self, op: Op) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.inner.lock().unwrap().gates.insert(op, gate.clone());
        gate
    }

    fn record<T>(
        &self,
        call: Call,
        apply: impl FnOnce(&mut Inner) -> T,
    ) -> (Result<T>, Option<Arc<Semaphore>>) {
        let mut inner = self.inner.lock().unwrap();
        let op = call.op();
        inner.calls.push(call);
        let gate = inner.gates.remove(&op);
        let result = if inner.failing.contains(&op) {
            Err(AppError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                url: format!("http://localhost:8000/api/moods/#{:?}", op),
            })
        } else {
            Ok(apply(&mut *inner))
        };
        (result, gate)
    }
}

async fn pass(gate: Option<Arc<Semaphore>>) {
    if let Some(gate) = gate {
        let _permit = gate.acquire().await;
    }
}

#[async_trait]
impl EntryGateway for FakeGateway {
    async fn list_entries(&self) -> Result<Vec<MoodEntry>> {
        let (result, gate) = self.record(Call::List, |inner| inner.entries.clone());
        pass(gate).await;
        result
    }

    async fn create_entry(&self, draft: &EntryDraft) -> Result<MoodEntry> {
        let (result, gate) = self.record(Call::Create(draft.clone()), |inner| {
            let id = inner.next_id;
            inner.next_id += 1;
            let entry = MoodEntry {
                id,
                mood: draft.mood.clone(),
                note: draft.note.clone(),
                color: draft.color.clone(),
                created_at: Utc::now(),
            };
            // Newest first, like the backend
            inner.entries.insert(0, entry.clone());
            entry
        });
        pass(gate).await;
        result
    }

    async fn update_entry(&self, id: EntryId, draft: &EntryDraft) -> Result<Option<MoodEntry>> {
        let (result, gate) = self.record(Call::Update(id, draft.clone()), |inner| {
            inner.entries.iter_mut().find(|e| e.id == id).map(|entry| {
                entry.mood = draft.mood.clone();
                entry.note = draft.note.clone();
                entry.color = draft.color.clone();
                entry.clone()
            })
        });
        pass(gate).await;
        match result? {
            Some(entry) => Ok(Some(entry)),
            None => Err(AppError::EntryNotFound(id)),
        }
    }

    async fn delete_entry(&self, id: EntryId) -> Result<()> {
        let (result, gate) = self.record(Call::Delete(id), |inner| {
            let before = inner.entries.len();
            inner.entries.retain(|e| e.id != id);
            before != inner.entries.len()
        });
        pass(gate).await;
        if result? {
            Ok(())
        } else {
            Err(AppError::EntryNotFound(id))
        }
    }

    async fn get_analysis(&self) -> Result<AnalysisReport> {
        let (result, gate) = self.record(Call::Analysis, |inner| {
            if let Some(report) = &inner.analysis {
                return report.clone();
            }
            if inner.entries.is_empty() {
                AnalysisReport {
                    error: Some("No moods to analyze yet. Start tracking your moods!".to_string()),
                    ..AnalysisReport::default()
                }
            } else {
                AnalysisReport {
                    analysis: Some(format!("{} moods look steady.", inner.entries.len())),
                    model_used: Some("gemini-1.5-flash".to_string()),
                    moods_analyzed: Some(inner.entries.len() as u32),
                    error: None,
                }
            }
        });
        pass(gate).await;
        result
    }
}
