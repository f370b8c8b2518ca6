//! Visitor, signup and feedback statistics derived from the raw event log.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::submission::{Payload, Submission};

/// Aggregate view served by `GET /api/stats/data`.
///
/// Recomputed from the full submission list on every read. `leads` and
/// `feedback` keep stored order; sorting is left to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_visitors: usize,
    pub total_joins: usize,
    pub total_feedback: usize,
    pub leads: Vec<Submission>,
    pub feedback: Vec<Submission>,
}

/// Key that merges repeated join events into one lead.
///
/// `visitorId` wins over `email`: a browser that re-submits the form with a
/// corrected address replaces its earlier lead.
pub fn dedup_key(submission: &Submission) -> Option<&str> {
    match &submission.payload {
        Payload::Join { email, .. } => submission
            .visitor_key()
            .or_else(|| Some(email.as_str()).filter(|e| !e.trim().is_empty())),
        _ => None,
    }
}

/// Derive a [`StatsSnapshot`] from `submissions` in stored order.
///
/// - `total_visitors`: distinct non-blank `visitorId` values across every type.
/// - `leads`: one entry per [`dedup_key`], the last join for that key winning.
///   The lead keeps the position where its key was first seen. Joins with
///   neither `visitorId` nor `email` are dropped.
/// - `feedback`: every feedback submission, unfiltered.
pub fn compute_stats(submissions: &[Submission]) -> StatsSnapshot {
    let mut visitors: HashSet<&str> = HashSet::new();
    let mut lead_slots: HashMap<&str, usize> = HashMap::new();
    let mut leads: Vec<Submission> = Vec::new();
    let mut feedback: Vec<Submission> = Vec::new();

    for entry in submissions {
        if let Some(visitor) = entry.visitor_key() {
            visitors.insert(visitor);
        }

        if let Some(key) = dedup_key(entry) {
            match lead_slots.get(key) {
                Some(&slot) => leads[slot] = entry.clone(),
                None => {
                    lead_slots.insert(key, leads.len());
                    leads.push(entry.clone());
                }
            }
        } else if entry.is_feedback() {
            feedback.push(entry.clone());
        }
    }

    StatsSnapshot {
        total_visitors: visitors.len(),
        total_joins: leads.len(),
        total_feedback: feedback.len(),
        leads,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::NewSubmission;

    fn join(email: &str, visitor: Option<&str>) -> Submission {
        NewSubmission::join(
            Some(email.to_string()),
            false,
            visitor.map(str::to_string),
            None,
        )
        .expect("valid join")
        .stamp()
    }

    fn visit(visitor: Option<&str>) -> Submission {
        NewSubmission::visit(visitor.map(str::to_string), Some("test-agent".into())).stamp()
    }

    fn feedback(content: &str, visitor: Option<&str>) -> Submission {
        NewSubmission::feedback(Some(content.to_string()), visitor.map(str::to_string))
            .expect("valid feedback")
            .stamp()
    }

    #[test]
    fn empty_log_yields_zeroes() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_visitors, 0);
        assert_eq!(stats.total_joins, 0);
        assert_eq!(stats.total_feedback, 0);
        assert!(stats.leads.is_empty());
        assert!(stats.feedback.is_empty());
    }

    #[test]
    fn visitors_counted_across_all_types() {
        let log = vec![
            visit(Some("v1")),
            visit(Some("v1")),
            join("a@x.com", Some("v2")),
            feedback("nice", Some("v3")),
            visit(None),
        ];
        assert_eq!(compute_stats(&log).total_visitors, 3);
    }

    #[test]
    fn last_join_for_same_visitor_wins() {
        let log = vec![join("first@x.com", Some("v1")), join("second@x.com", Some("v1"))];
        let stats = compute_stats(&log);
        assert_eq!(stats.total_joins, 1);
        assert_eq!(stats.leads.len(), 1);
        assert_eq!(stats.leads[0], log[1]);
    }

    #[test]
    fn email_is_the_fallback_key() {
        let log = vec![
            join("a@x.com", None),
            join("b@x.com", None),
            join("a@x.com", None),
        ];
        let stats = compute_stats(&log);
        assert_eq!(stats.total_joins, 2);
        // The re-submitted lead stays in its original slot.
        assert_eq!(stats.leads[0], log[2]);
        assert_eq!(stats.leads[1], log[1]);
    }

    #[test]
    fn join_without_any_key_is_dropped() {
        let mut orphan = join("a@x.com", None);
        orphan.payload = Payload::Join {
            email: String::new(),
            api_access: true,
            name: None,
        };
        let stats = compute_stats(&[orphan]);
        assert_eq!(stats.total_joins, 0);
        assert!(stats.leads.is_empty());
    }

    #[test]
    fn feedback_is_kept_in_stored_order() {
        let log = vec![
            feedback("one", Some("v1")),
            visit(Some("v1")),
            feedback("two", Some("v1")),
        ];
        let stats = compute_stats(&log);
        assert_eq!(stats.total_feedback, 2);
        assert_eq!(stats.feedback, vec![log[0].clone(), log[2].clone()]);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let stats = compute_stats(&[visit(Some("v1"))]);
        let value = serde_json::to_value(&stats).expect("serialize");
        assert_eq!(value["totalVisitors"], 1);
        assert_eq!(value["totalJoins"], 0);
        assert_eq!(value["totalFeedback"], 0);
        assert!(value["leads"].is_array());
        assert!(value["feedback"].is_array());
    }
}
