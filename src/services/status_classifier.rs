//! Aggregate review status of a pull request.
//!
//! The status starts as the "awaiting merge" sentinel. Each blocking condition
//! found appends a segment; the first one replaces the sentinel outright and
//! later ones are joined with the separator. Checks run in a fixed order, so
//! the same inputs always produce the same string.

/// Wording and marker labels used by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusVocabulary {
    pub pending: &'static str,
    pub draft: &'static str,
    pub conflicts: &'static str,
    pub cla_failed: &'static str,
    pub ci_failed: &'static str,
    pub waiting_for_update: &'static str,
    pub separator: &'static str,
    pub cla_verified_label: &'static str,
    pub ci_failed_label: &'static str,
    pub wait_for_update_label: &'static str,
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            pending: "待合入",
            draft: "草稿",
            conflicts: "存在冲突",
            cla_failed: "CLA认证失败",
            ci_failed: "门禁检查失败",
            waiting_for_update: "等待更新",
            separator: "、",
            cla_verified_label: "openeuler-cla/yes",
            ci_failed_label: "ci_failed",
            wait_for_update_label: "kind/wait_for_update",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusClassifier {
    vocabulary: StatusVocabulary,
}

impl StatusClassifier {
    pub fn new(vocabulary: StatusVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Classify a pull request. `mergeable` of `None` means unknown and does
    /// not count as a conflict.
    pub fn classify<S: AsRef<str>>(&self, labels: &[S], draft: bool, mergeable: Option<bool>) -> String {
        let v = &self.vocabulary;
        let has = |wanted: &str| labels.iter().any(|l| l.as_ref() == wanted);

        let mut status = v.pending.to_string();
        if draft {
            self.append(&mut status, v.draft);
        }
        if mergeable == Some(false) {
            self.append(&mut status, v.conflicts);
        }
        if !has(v.cla_verified_label) {
            self.append(&mut status, v.cla_failed);
        }
        if has(v.ci_failed_label) {
            self.append(&mut status, v.ci_failed);
        }
        if has(v.wait_for_update_label) {
            self.append(&mut status, v.waiting_for_update);
        }
        status
    }

    fn append(&self, status: &mut String, segment: &str) {
        if status == self.vocabulary.pending {
            status.clear();
        } else {
            status.push_str(self.vocabulary.separator);
        }
        status.push_str(segment);
    }
}
