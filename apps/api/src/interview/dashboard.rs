//! Progress metrics derived from recorded attempts.

use serde::Serialize;

use super::analysis::ResumeAnalysis;
use super::evaluation::Category;
use crate::models::attempt::InterviewAttemptRow;

/// Practice time is estimated, not measured.
const MINUTES_PER_QUESTION: usize = 2;
const TREND_WINDOW: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub resume: Option<ResumeAnalysis>,
    pub stats: DashboardStats,
    pub charts: DashboardCharts,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_questions: usize,
    pub avg_score: f64,
    pub practice_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardCharts {
    /// [technical, behavioral, system design]
    pub skills: [usize; 3],
    pub trend_labels: Vec<String>,
    pub trend_data: Vec<f64>,
}

/// `attempts` must be ordered oldest first.
pub fn build_dashboard(attempts: &[InterviewAttemptRow], resume: Option<ResumeAnalysis>) -> Dashboard {
    let total_questions = attempts.len();
    let avg_score = if total_questions == 0 {
        0.0
    } else {
        let sum: f64 = attempts.iter().map(|a| a.score).sum();
        round_one_decimal(sum / total_questions as f64)
    };

    let mut skills = [0usize; 3];
    for attempt in attempts {
        let slot = match Category::fold(&attempt.category) {
            Category::Technical => 0,
            Category::Behavioral => 1,
            Category::SystemDesign => 2,
        };
        skills[slot] += 1;
    }

    let recent = &attempts[total_questions.saturating_sub(TREND_WINDOW)..];

    Dashboard {
        resume,
        stats: DashboardStats {
            total_questions,
            avg_score,
            practice_time: practice_time(total_questions),
        },
        charts: DashboardCharts {
            skills,
            trend_labels: recent
                .iter()
                .map(|a| a.created_at.format("%b %-d").to_string())
                .collect(),
            trend_data: recent.iter().map(|a| a.score).collect(),
        },
    }
}

fn practice_time(questions: usize) -> String {
    let minutes = questions * MINUTES_PER_QUESTION;
    if minutes > 60 {
        format!("{:.1}h", minutes as f64 / 60.0)
    } else {
        format!("{minutes}m")
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
