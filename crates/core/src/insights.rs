//! Fixed illustrative figures for the analytics and AI insights pages
//!
//! None of these numbers are computed. They mirror the marketing dashboard and
//! exist so the pages have something to render.

/// Whether a showcased model is serving or retraining
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Active,
    Training,
}

/// One showcased model card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightModel {
    pub name: &'static str,
    pub algorithm: &'static str,
    pub accuracy: u8,
    pub precision: u8,
    pub recall: u8,
    pub f1: u8,
    pub description: &'static str,
    pub features: [&'static str; 5],
    pub status: ModelStatus,
    pub last_trained: &'static str,
    pub data_points: &'static str,
}

/// A labelled headline figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: &'static str,
    pub unit: &'static str,
}

/// A labelled series of integer samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Series {
    pub label: &'static str,
    pub labels: &'static [&'static str],
    pub values: &'static [u32],
}

pub const INSIGHT_MODELS: [InsightModel; 6] = [
    InsightModel {
        name: "Lead Scoring Engine",
        algorithm: "Random Forest Classifier",
        accuracy: 87,
        precision: 89,
        recall: 85,
        f1: 87,
        description: "Predicts lead conversion probability using 50+ behavioral features including engagement patterns, company demographics, and historical interaction data.",
        features: ["Engagement Score", "Company Size", "Industry Match", "Response Time", "Content Interactions"],
        status: ModelStatus::Active,
        last_trained: "2 hours ago",
        data_points: "125K",
    },
    InsightModel {
        name: "Sales Forecasting",
        algorithm: "LSTM Neural Network",
        accuracy: 91,
        precision: 92,
        recall: 90,
        f1: 91,
        description: "Time-series sales prediction using Long Short-Term Memory networks trained on historical revenue data, seasonal patterns, and market indicators.",
        features: ["Historical Revenue", "Seasonality", "Pipeline Data", "Market Trends", "Economic Indicators"],
        status: ModelStatus::Active,
        last_trained: "6 hours ago",
        data_points: "89K",
    },
    InsightModel {
        name: "Churn Prediction",
        algorithm: "XGBoost Classifier",
        accuracy: 84,
        precision: 86,
        recall: 82,
        f1: 84,
        description: "Identifies customers at risk of churning by analyzing usage patterns, support ticket history, payment behavior, and engagement metrics.",
        features: ["Usage Frequency", "Support Tickets", "Payment History", "Feature Adoption", "NPS Score"],
        status: ModelStatus::Active,
        last_trained: "1 day ago",
        data_points: "67K",
    },
    InsightModel {
        name: "Sentiment Analysis",
        algorithm: "Fine-tuned BERT",
        accuracy: 89,
        precision: 91,
        recall: 87,
        f1: 89,
        description: "NLP-powered sentiment classification on customer feedback, support conversations, and social media mentions using transformer-based architecture.",
        features: ["Customer Reviews", "Support Chats", "Email Sentiment", "Social Mentions", "Survey Responses"],
        status: ModelStatus::Active,
        last_trained: "4 hours ago",
        data_points: "234K",
    },
    InsightModel {
        name: "Smart Task Assignment",
        algorithm: "Reinforcement Learning (MAB)",
        accuracy: 76,
        precision: 78,
        recall: 74,
        f1: 76,
        description: "Optimizes task allocation across team members using Multi-Armed Bandit approach, balancing workload, expertise matching, and deadline proximity.",
        features: ["Skill Matrix", "Workload Balance", "Deadline Priority", "Historical Performance", "Availability"],
        status: ModelStatus::Training,
        last_trained: "12 hours ago",
        data_points: "45K",
    },
    InsightModel {
        name: "Document Classifier",
        algorithm: "TF-IDF + SVM",
        accuracy: 82,
        precision: 84,
        recall: 80,
        f1: 82,
        description: "Automatically categorizes incoming documents, emails, and attachments into predefined project categories and priority levels.",
        features: ["Text Content", "Metadata", "File Type", "Sender Info", "Keywords"],
        status: ModelStatus::Active,
        last_trained: "3 days ago",
        data_points: "18K",
    },
];

pub const INSIGHT_OVERVIEW: [Kpi; 4] = [
    Kpi { label: "Total Predictions", value: "1.2M", unit: "" },
    Kpi { label: "Avg Accuracy", value: "84.8%", unit: "" },
    Kpi { label: "Models Active", value: "5/6", unit: "" },
    Kpi { label: "Data Points", value: "578K", unit: "" },
];

pub const ANALYTICS_KPIS: [Kpi; 4] = [
    Kpi { label: "Avg Velocity", value: "24.5", unit: "pts/sprint" },
    Kpi { label: "Completion Rate", value: "87%", unit: "this month" },
    Kpi { label: "Lead Time", value: "3.2", unit: "days avg" },
    Kpi { label: "Bug Resolution", value: "1.8", unit: "days avg" },
];

const SPRINTS: &[&str] = &["Sprint 1", "Sprint 2", "Sprint 3", "Sprint 4", "Sprint 5", "Sprint 6"];
const DAYS: &[&str] = &[
    "Day 1", "Day 2", "Day 3", "Day 4", "Day 5", "Day 6", "Day 7", "Day 8", "Day 9", "Day 10",
];

pub const TASK_DISTRIBUTION: Series = Series {
    label: "Task Distribution",
    labels: &["Completed", "In Progress", "New", "Blocked"],
    values: &[42, 28, 22, 8],
};

pub const VELOCITY_PLANNED: Series = Series {
    label: "Planned",
    labels: SPRINTS,
    values: &[24, 30, 28, 35, 32, 38],
};

pub const VELOCITY_COMPLETED: Series = Series {
    label: "Completed",
    labels: SPRINTS,
    values: &[22, 28, 30, 33, 35, 36],
};

pub const BURNDOWN_IDEAL: Series = Series {
    label: "Ideal",
    labels: DAYS,
    values: &[100, 90, 80, 70, 60, 50, 40, 30, 20, 10],
};

pub const BURNDOWN_ACTUAL: Series = Series {
    label: "Actual",
    labels: DAYS,
    values: &[100, 95, 88, 75, 68, 55, 42, 38, 25, 12],
};

pub const TEAM_PERFORMANCE: Series = Series {
    label: "Tasks Completed",
    labels: &["Admin", "Dev 1", "Dev 2", "Designer", "QA"],
    values: &[32, 28, 24, 18, 22],
};

pub const ISSUE_SEVERITY: Series = Series {
    label: "Issues by Severity",
    labels: &["Critical", "High", "Normal", "Low", "Wishlist"],
    values: &[5, 12, 25, 15, 8],
};

/// Mean F1 across the showcased models
pub fn mean_f1() -> f64 {
    let total: u32 = INSIGHT_MODELS.iter().map(|m| u32::from(m.f1)).sum();
    f64::from(total) / INSIGHT_MODELS.len() as f64
}
