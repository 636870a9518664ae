mod goal_form;

pub use goal_form::{FieldError, GoalField, GoalForm, GoalFormError};
