//! 内存存储实现
//!
//! 所有状态放在同一把读写锁下，评分提交对提交记录和项目的修改一起生效。

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::{GradingError, Result};
use crate::models::{
    grading::entities::ConsensusState,
    projects::{entities::Project, requests::UpsertProjectRequest},
    submissions::{
        entities::{GradingCommit, MAX_ATTEMPTS, SubmissionAttempt, SubmissionRecord},
        requests::SaveAttemptRequest,
    },
};
use crate::storage::Storage;
use crate::storage::register::BoxedStorageFuture;

pub const PLUGIN_NAME: &str = "memory";

pub(crate) fn construct() -> BoxedStorageFuture {
    Box::pin(async {
        info!("内存存储初始化完成");
        Ok(Box::new(MemoryStorage::new()) as Box<dyn Storage>)
    })
}

type RecordKey = (String, String);

#[derive(Default)]
struct MemoryState {
    projects: HashMap<String, Project>,
    records: HashMap<RecordKey, SubmissionRecord>,
}

/// 内存存储实现
#[derive(Default)]
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn record_key(project_id: &str, student_id: &str) -> RecordKey {
    (project_id.to_string(), student_id.to_string())
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upsert_project(
        &self,
        project_id: &str,
        req: UpsertProjectRequest,
    ) -> Result<Project> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        let project = match state.projects.get_mut(project_id) {
            Some(existing) => {
                existing.deadlines = req.deadlines;
                existing.markers = req.markers;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let project = Project {
                    id: project_id.to_string(),
                    deadlines: req.deadlines,
                    markers: req.markers,
                    third_marker_required: false,
                    progress: 0,
                    updated_at: now,
                };
                state
                    .projects
                    .insert(project_id.to_string(), project.clone());
                project
            }
        };

        debug!("Project {} stored", project_id);
        Ok(project)
    }

    async fn get_project(&self, project_id: &str) -> Result<Option<Project>> {
        let state = self.state.read().await;
        Ok(state.projects.get(project_id).cloned())
    }

    async fn get_submission_record(
        &self,
        project_id: &str,
        student_id: &str,
    ) -> Result<Option<SubmissionRecord>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .get(&record_key(project_id, student_id))
            .cloned())
    }

    async fn save_attempt(
        &self,
        project_id: &str,
        student_id: &str,
        req: SaveAttemptRequest,
    ) -> Result<SubmissionRecord> {
        let mut state = self.state.write().await;

        if !state.projects.contains_key(project_id) {
            return Err(GradingError::not_found(format!(
                "project '{project_id}' not found"
            )));
        }

        let index = usize::from(req.attempt_index);
        if index >= MAX_ATTEMPTS {
            return Err(GradingError::validation(format!(
                "attempt index must be below {MAX_ATTEMPTS}"
            )));
        }

        let key = record_key(project_id, student_id);
        let expected = state.records.get(&key).map_or(0, |r| r.attempts.len());
        if index > expected {
            return Err(GradingError::conflict(format!(
                "attempt {} cannot be saved before attempt {expected}",
                req.attempt_index
            )));
        }

        let now = Utc::now();
        let created_at = req.created_at.unwrap_or(now);
        let record = state
            .records
            .entry(key)
            .or_insert_with(|| SubmissionRecord {
                project_id: project_id.to_string(),
                student_id: student_id.to_string(),
                attempts: Vec::new(),
                final_grade: None,
                final_marks: None,
                created_at: now,
                updated_at: now,
            });

        if let Some(existing) = record.attempt_mut(req.attempt_index) {
            // 已开始评分的提交不允许重新上传
            if existing.is_graded() {
                return Err(GradingError::conflict(format!(
                    "attempt {} has already been graded and cannot be replaced",
                    req.attempt_index
                )));
            }
            existing.artifact_ref = req.artifact_ref;
            existing.created_at = created_at;
        } else {
            record.attempts.push(SubmissionAttempt::new(
                req.attempt_index,
                req.artifact_ref,
                created_at,
            ));
        }

        record.updated_at = now;
        Ok(record.clone())
    }

    async fn commit_grading(&self, commit: GradingCommit) -> Result<(SubmissionAttempt, Project)> {
        let mut state = self.state.write().await;
        let MemoryState { projects, records } = &mut *state;

        if !projects.contains_key(&commit.project_id) {
            return Err(GradingError::not_found(format!(
                "project '{}' not found",
                commit.project_id
            )));
        }
        let record = records
            .get_mut(&record_key(&commit.project_id, &commit.student_id))
            .ok_or_else(|| {
                GradingError::not_found(format!(
                    "no submission record for student '{}' on project '{}'",
                    commit.student_id, commit.project_id
                ))
            })?;
        let stored = record
            .attempt_mut(commit.attempt.attempt_index)
            .ok_or_else(|| {
                GradingError::not_found(format!(
                    "attempt {} not found",
                    commit.attempt.attempt_index
                ))
            })?;

        if stored.entries.len() != commit.expected_entries {
            return Err(GradingError::conflict(format!(
                "attempt {} was modified concurrently",
                commit.attempt.attempt_index
            )));
        }

        let now = Utc::now();
        *stored = commit.attempt;
        let attempt = stored.clone();
        record.updated_at = now;

        let awaiting = awaiting_arbitration(records, &commit.project_id);
        let project = projects.get_mut(&commit.project_id).ok_or_else(|| {
            GradingError::not_found(format!("project '{}' not found", commit.project_id))
        })?;

        let mut changed = false;
        if !commit.project_patch.is_noop() {
            commit.project_patch.apply(project);
            changed = true;
        }
        if project.third_marker_required != awaiting {
            debug!(
                "Project {} arbitration flag {} -> {}",
                project.id, project.third_marker_required, awaiting
            );
            project.third_marker_required = awaiting;
            changed = true;
        }
        if changed {
            project.updated_at = now;
        }

        Ok((attempt, project.clone()))
    }
}

/// 项目下是否仍有等待第三评阅人的提交
fn awaiting_arbitration(records: &HashMap<RecordKey, SubmissionRecord>, project_id: &str) -> bool {
    records
        .values()
        .filter(|record| record.project_id == project_id)
        .flat_map(|record| record.attempts.iter())
        .any(|attempt| attempt.consensus == ConsensusState::AwaitingArbitration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grading::entities::{GradeLetter, GradingEntry, MarkerRole};
    use crate::models::projects::entities::{ProjectDeadlines, ProjectMarkers, ProjectPatch};

    fn upsert_request(first: &str) -> UpsertProjectRequest {
        UpsertProjectRequest {
            deadlines: ProjectDeadlines::default(),
            markers: ProjectMarkers {
                supervisor_first: first.to_string(),
                ..Default::default()
            },
        }
    }

    fn save(index: u8) -> SaveAttemptRequest {
        SaveAttemptRequest {
            attempt_index: index,
            artifact_ref: format!("uploads/{index}.pdf"),
            created_at: None,
        }
    }

    fn graded(mut attempt: SubmissionAttempt) -> SubmissionAttempt {
        attempt.entries.push(GradingEntry {
            id: "e1".to_string(),
            marker_id: "alice".to_string(),
            role: MarkerRole::SupervisorFirst,
            marks: 70.0,
            raw_marks: 70.0,
            late_days: 0,
            grade: GradeLetter::B,
            summative_assessment: Vec::new(),
            justification: "ok".to_string(),
            formative_feedback: None,
            graded_at: Utc::now(),
        });
        attempt
    }

    fn escalated(mut attempt: SubmissionAttempt) -> SubmissionAttempt {
        attempt.consensus = ConsensusState::AwaitingArbitration;
        attempt
    }

    async fn commit_attempt(storage: &MemoryStorage, student_id: &str, attempt: SubmissionAttempt) {
        let expected_entries = storage
            .get_submission_record("p1", student_id)
            .await
            .unwrap()
            .and_then(|r| r.attempt(attempt.attempt_index).map(|a| a.entries.len()))
            .unwrap();
        storage
            .commit_grading(GradingCommit {
                project_id: "p1".to_string(),
                student_id: student_id.to_string(),
                attempt,
                expected_entries,
                project_patch: ProjectPatch::default(),
            })
            .await
            .unwrap();
    }

    async fn first_attempt(
        storage: &MemoryStorage,
        project_id: &str,
        student_id: &str,
    ) -> SubmissionAttempt {
        storage
            .get_submission_record(project_id, student_id)
            .await
            .unwrap()
            .and_then(|r| r.attempt(0).cloned())
            .unwrap()
    }

    #[tokio::test]
    async fn test_upsert_preserves_engine_fields() {
        let storage = MemoryStorage::new();
        storage.upsert_project("p1", upsert_request("alice")).await.unwrap();
        storage.save_attempt("p1", "s1", save(0)).await.unwrap();

        let record = storage.get_submission_record("p1", "s1").await.unwrap().unwrap();
        let attempt = record.attempt(0).cloned().unwrap();
        storage
            .commit_grading(GradingCommit {
                project_id: "p1".to_string(),
                student_id: "s1".to_string(),
                attempt: escalated(graded(attempt)),
                expected_entries: 0,
                project_patch: ProjectPatch {
                    progress_delta: 25,
                    progress_cap: 100,
                },
            })
            .await
            .unwrap();

        let project = storage.upsert_project("p1", upsert_request("dave")).await.unwrap();
        assert_eq!(project.markers.supervisor_first, "dave");
        assert_eq!(project.progress, 25);
        assert!(project.third_marker_required);
    }

    #[tokio::test]
    async fn test_save_attempt_requires_project() {
        let storage = MemoryStorage::new();
        let err = storage.save_attempt("missing", "s1", save(0)).await.unwrap_err();
        assert!(matches!(err, GradingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_attempts_saved_in_order() {
        let storage = MemoryStorage::new();
        storage.upsert_project("p1", upsert_request("alice")).await.unwrap();

        let err = storage.save_attempt("p1", "s1", save(1)).await.unwrap_err();
        assert!(matches!(err, GradingError::Conflict(_)));
        assert!(
            storage
                .get_submission_record("p1", "s1")
                .await
                .unwrap()
                .is_none()
        );

        storage.save_attempt("p1", "s1", save(0)).await.unwrap();
        let record = storage.save_attempt("p1", "s1", save(1)).await.unwrap();
        assert_eq!(record.attempts.len(), 2);

        let err = storage.save_attempt("p1", "s1", save(3)).await.unwrap_err();
        assert!(matches!(err, GradingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reupload_only_before_grading() {
        let storage = MemoryStorage::new();
        storage.upsert_project("p1", upsert_request("alice")).await.unwrap();
        storage.save_attempt("p1", "s1", save(0)).await.unwrap();

        let mut again = save(0);
        again.artifact_ref = "uploads/0-v2.pdf".to_string();
        let record = storage.save_attempt("p1", "s1", again.clone()).await.unwrap();
        assert_eq!(record.attempts.len(), 1);
        assert_eq!(record.attempts[0].artifact_ref, "uploads/0-v2.pdf");

        let attempt = record.attempts[0].clone();
        storage
            .commit_grading(GradingCommit {
                project_id: "p1".to_string(),
                student_id: "s1".to_string(),
                attempt: graded(attempt),
                expected_entries: 0,
                project_patch: ProjectPatch::default(),
            })
            .await
            .unwrap();

        let err = storage.save_attempt("p1", "s1", again).await.unwrap_err();
        assert!(matches!(err, GradingError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_stale_commit_rejected() {
        let storage = MemoryStorage::new();
        storage.upsert_project("p1", upsert_request("alice")).await.unwrap();
        let record = storage.save_attempt("p1", "s1", save(0)).await.unwrap();
        let attempt = record.attempts[0].clone();

        let commit = GradingCommit {
            project_id: "p1".to_string(),
            student_id: "s1".to_string(),
            attempt: graded(attempt),
            expected_entries: 0,
            project_patch: ProjectPatch {
                progress_delta: 25,
                progress_cap: 100,
            },
        };
        storage.commit_grading(commit.clone()).await.unwrap();

        let err = storage.commit_grading(commit).await.unwrap_err();
        assert!(matches!(err, GradingError::Conflict(_)));
        let project = storage.get_project("p1").await.unwrap().unwrap();
        assert_eq!(project.progress, 25);
    }

    #[tokio::test]
    async fn test_arbitration_flag_tracks_every_attempt_of_project() {
        let storage = MemoryStorage::new();
        storage.upsert_project("p1", upsert_request("alice")).await.unwrap();
        storage.upsert_project("p2", upsert_request("alice")).await.unwrap();
        for (project, student) in [("p1", "s1"), ("p1", "s2"), ("p2", "s1")] {
            storage.save_attempt(project, student, save(0)).await.unwrap();
        }

        let s1 = first_attempt(&storage, "p1", "s1").await;
        commit_attempt(&storage, "s1", escalated(graded(s1))).await;
        let s2 = first_attempt(&storage, "p1", "s2").await;
        commit_attempt(&storage, "s2", escalated(graded(s2))).await;
        assert!(storage.get_project("p1").await.unwrap().unwrap().third_marker_required);

        // 只裁定 s1，s2 仍在等待
        let mut s1 = first_attempt(&storage, "p1", "s1").await;
        s1.consensus = ConsensusState::FinalizedByThirdMarker;
        commit_attempt(&storage, "s1", s1).await;
        assert!(storage.get_project("p1").await.unwrap().unwrap().third_marker_required);
        assert!(!storage.get_project("p2").await.unwrap().unwrap().third_marker_required);

        let mut s2 = first_attempt(&storage, "p1", "s2").await;
        s2.consensus = ConsensusState::FinalizedByThirdMarker;
        commit_attempt(&storage, "s2", s2).await;
        assert!(!storage.get_project("p1").await.unwrap().unwrap().third_marker_required);
    }
}
