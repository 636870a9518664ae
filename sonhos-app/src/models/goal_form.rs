use std::fmt;

use chrono::{NaiveDate, Weekday};
use sonhos_core::calculations::common::parse_locale_amount;
use sonhos_core::{GoalStatus, NewGoal, SavingsPlan, SavingsPlanCalculator, WeekdaySet};
use thiserror::Error;

use crate::utils::{amount_display, opt_date_display};

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalField {
    Description,
    Importance,
    Amount,
    Workdays,
    StartDate,
    TargetDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: GoalField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Every field problem found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.iter().map(|e| e.message).collect::<Vec<_>>().join("; "))]
pub struct GoalFormError(pub Vec<FieldError>);

impl GoalFormError {
    pub fn message_for(
        &self,
        field: GoalField,
    ) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

/// Values collected by the "new goal" form, as typed.
#[derive(Clone, Debug)]
pub struct GoalForm {
    pub description: String,
    pub importance: String,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    /// Amount with Brazilian separators, e.g. `10.000,00`.
    pub amount: String,
    pub workdays: WeekdaySet,
    pub status: GoalStatus,
    pub image_url: String,
}

impl GoalForm {
    /// A blank form spanning `today` with Monday to Friday ticked.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            importance: String::new(),
            start_date: Some(today),
            target_date: Some(today),
            amount: String::new(),
            workdays: WeekdaySet::workdays(),
            status: GoalStatus::default(),
            image_url: String::new(),
        }
    }

    pub fn toggle_workday(
        &mut self,
        weekday: Weekday,
    ) {
        self.workdays.toggle(weekday);
    }

    /// The plan for the current field values. Recomputed on every call.
    pub fn savings_plan(&self) -> SavingsPlan {
        SavingsPlanCalculator::compute_from_input(
            &self.amount,
            self.start_date,
            self.target_date,
            &self.workdays,
        )
    }

    /// Checks the fields required before the goal can be submitted.
    ///
    /// Rules:
    /// - description and importance must not be blank
    /// - amount is required and must start with a number
    /// - at least one workday must be ticked
    /// - both dates are required and the target may not precede the start
    pub fn validate_for_submit(&self) -> Result<(), GoalFormError> {
        let mut errors = Vec::new();
        let mut push = |field, message| errors.push(FieldError { field, message });

        if self.description.trim().is_empty() {
            push(GoalField::Description, "Descrição é obrigatória");
        }
        if self.importance.trim().is_empty() {
            push(GoalField::Importance, "Importância é obrigatória");
        }
        if self.amount.trim().is_empty() {
            push(GoalField::Amount, "Valor é obrigatório");
        } else if parse_locale_amount(&self.amount).is_none() {
            push(GoalField::Amount, "Valor inválido");
        }
        if self.workdays.is_empty() {
            push(GoalField::Workdays, "Selecione pelo menos um dia de trabalho");
        }
        match (self.start_date, self.target_date) {
            (None, _) => push(GoalField::StartDate, "Data inicial é obrigatória"),
            (_, None) => push(GoalField::TargetDate, "Data final é obrigatória"),
            (Some(start), Some(target)) if target < start => push(
                GoalField::TargetDate,
                "Data final não pode ser anterior à data inicial",
            ),
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GoalFormError(errors))
        }
    }

    /// Validates and converts the form into a goal ready to be stored.
    ///
    /// The goal's initial daily target is the plan's per-day savings.
    pub fn submit(&self) -> Result<NewGoal, GoalFormError> {
        self.validate_for_submit()?;

        let (Some(start_date), Some(target_date), Some(amount)) = (
            self.start_date,
            self.target_date,
            parse_locale_amount(&self.amount),
        ) else {
            unreachable!("validate_for_submit checks dates and amount");
        };

        Ok(NewGoal {
            description: self.description.trim().to_string(),
            importance: self.importance.trim().to_string(),
            start_date,
            target_date,
            amount,
            workdays: self.workdays,
            initial_daily_goal: self.savings_plan().per_day_savings,
            status: self.status,
            image_url: self.image_url.clone(),
        })
    }
}

impl fmt::Display for GoalForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let amount = parse_locale_amount(&self.amount)
            .map(amount_display)
            .unwrap_or_else(|| "—".to_string());

        writeln!(f, "Descrição:     {}", self.description)?;
        writeln!(f, "Importância:   {}", self.importance)?;
        writeln!(f, "Início:        {}", opt_date_display(&self.start_date))?;
        writeln!(f, "Meta até:      {}", opt_date_display(&self.target_date))?;
        writeln!(f, "Valor:         {amount}")?;
        writeln!(f, "Dias:          {}", self.workdays)?;
        write!(f, "Status:        {}", self.status)
    }
}
