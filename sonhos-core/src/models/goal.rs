use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WeekdaySet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Waiting,
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(Self::Waiting),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Waiting => "Aguardando",
            Self::InProgress => "Em andamento",
            Self::Completed => "Concluído",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub description: String,
    pub importance: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub amount: Decimal,
    pub workdays: WeekdaySet,
    pub initial_daily_goal: Decimal,
    pub status: GoalStatus,
    pub image_url: String,
    pub completed: bool,
    pub completed_date: Option<NaiveDate>,
}

/// For creating new goals (no id or completion state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGoal {
    pub description: String,
    pub importance: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub amount: Decimal,
    pub workdays: WeekdaySet,
    pub initial_daily_goal: Decimal,
    pub status: GoalStatus,
    pub image_url: String,
}

impl NewGoal {
    /// Attaches an identifier assigned by whatever store receives the goal.
    pub fn into_goal(
        self,
        id: impl Into<String>,
    ) -> Goal {
        let completed = self.status == GoalStatus::Completed;
        Goal {
            id: id.into(),
            description: self.description,
            importance: self.importance,
            start_date: self.start_date,
            target_date: self.target_date,
            amount: self.amount,
            workdays: self.workdays,
            initial_daily_goal: self.initial_daily_goal,
            status: self.status,
            image_url: self.image_url,
            completed,
            completed_date: None,
        }
    }
}
