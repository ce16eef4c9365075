use serde::{Deserialize, Serialize};

use crate::profile::ProfileRecord;

/// Risk classification derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl Risk {
    fn from_score(score: i32) -> Self {
        if score < 40 {
            Risk::High
        } else if score < 60 {
            Risk::Medium
        } else {
            Risk::Low
        }
    }
}

/// The profile fields echoed back with a report. The bio is deliberately
/// not included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProfile {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub platform: Option<String>,
}

/// The unlocked check result. Recomputed from the stored profile on every
/// authorized read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub score: i32,
    pub risk: Risk,
    pub reasons: Vec<String>,
    pub profile: ReportProfile,
}

/// Compute a report from a stored profile.
///
/// Total and deterministic: starts at 80 and applies each penalty rule in
/// order, appending its reason when it fires.
pub fn generate(profile: &ProfileRecord) -> Report {
    let mut score = 80;
    let mut reasons = Vec::new();

    let handle = profile.handle.as_deref().unwrap_or("");
    if handle.is_empty() {
        score -= 10;
        reasons.push("No public handle provided.".to_string());
    }

    let bio = profile.bio.as_deref();
    if bio.map_or(true, |b| b.len() < 10) {
        score -= 10;
        reasons.push("Bio is too short or missing.".to_string());
    }

    if bio.is_some_and(|b| b.to_lowercase().contains("telegram")) {
        score -= 15;
        reasons.push("External contact in bio (Telegram).".to_string());
    }

    Report {
        score,
        risk: Risk::from_score(score),
        reasons,
        profile: ReportProfile {
            name: profile.name.clone(),
            handle: profile.handle.clone(),
            platform: profile.platform.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileSubmission;

    fn record(handle: Option<&str>, bio: Option<&str>) -> ProfileRecord {
        ProfileRecord::new(
            "test",
            ProfileSubmission {
                name: Some("Riya S.".to_string()),
                handle: handle.map(String::from),
                platform: Some("instagram".to_string()),
                bio: bio.map(String::from),
            },
        )
    }

    #[test]
    fn test_empty_handle_and_bio_penalized() {
        // 60 is exactly the Low boundary
        let report = generate(&record(Some(""), Some("")));
        assert_eq!(report.score, 60);
        assert_eq!(report.risk, Risk::Low);
        assert_eq!(
            report.reasons,
            vec![
                "No public handle provided.".to_string(),
                "Bio is too short or missing.".to_string(),
            ]
        );
    }

    #[test]
    fn test_telegram_in_bio_penalized() {
        let bio = "Travel and coffee, reach me on Telegram!";
        let report = generate(&record(Some("abc"), Some(bio)));
        assert_eq!(report.score, 65);
        assert_eq!(report.risk, Risk::Low);
        assert_eq!(
            report.reasons,
            vec!["External contact in bio (Telegram).".to_string()]
        );
    }

    #[test]
    fn test_telegram_match_is_case_insensitive() {
        let report = generate(&record(Some("abc"), Some("contact: TELEGRAM @someone")));
        assert_eq!(report.score, 65);
    }

    #[test]
    fn test_clean_profile_scores_low_risk() {
        let bio = "a long enough bio without contact info";
        let report = generate(&record(Some("abc"), Some(bio)));
        assert_eq!(report.score, 80);
        assert_eq!(report.risk, Risk::Low);
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn test_absent_bio_skips_telegram_rule() {
        // Both the handle and bio penalties fire, but the telegram rule
        // cannot without a bio.
        let report = generate(&record(None, None));
        assert_eq!(report.score, 60);
        assert_eq!(report.risk, Risk::Low);
        assert_eq!(report.reasons.len(), 2);
    }

    #[test]
    fn test_all_three_penalties_stack() {
        // No handle + short bio that mentions telegram: 80 - 10 - 10 - 15.
        let report = generate(&record(None, Some("telegram")));
        assert_eq!(report.score, 45);
        assert_eq!(report.risk, Risk::Medium);
        assert_eq!(report.reasons.len(), 3);
    }

    #[test]
    fn test_bio_is_not_echoed_back() {
        let report = generate(&record(Some("abc"), Some("private details here")));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["profile"].get("bio").is_none());
        assert_eq!(json["profile"]["handle"], "abc");
    }

    #[test]
    fn test_risk_boundaries() {
        assert_eq!(Risk::from_score(39), Risk::High);
        assert_eq!(Risk::from_score(40), Risk::Medium);
        assert_eq!(Risk::from_score(59), Risk::Medium);
        assert_eq!(Risk::from_score(60), Risk::Low);
    }
}
