//! Goal planner and advisor handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::parse_body;
use crate::{AppError, AppState};
use fintrack_core::models::{Goal, NewGoal};
use fintrack_core::{advisor, Advice, FinanceStore, GoalPlan, Reporter};

/// Advice as the dashboard renders it
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub monthly_amount: f64,
    pub months: i64,
    /// True when the deadline or amounts could not be used and `(0, 1)` is shown
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub message: String,
}

impl AdviceResponse {
    pub fn new(advice: &Advice, currency: &str) -> Self {
        Self {
            monthly_amount: advice.monthly_amount(),
            months: advice.months(),
            fallback: advice.is_fallback(),
            reason: advice.fallback_reason().map(|r| r.to_string()),
            message: advice.message(currency),
        }
    }
}

/// A goal together with its current advice
#[derive(Debug, Serialize)]
pub struct GoalWithAdvice {
    pub goal: Goal,
    pub advice: AdviceResponse,
}

impl GoalWithAdvice {
    fn from_plan(plan: GoalPlan, currency: &str) -> Self {
        let advice = AdviceResponse::new(&plan.advice, currency);
        Self {
            goal: plan.goal,
            advice,
        }
    }
}

/// GET /api/goals - All goals in insertion order
pub async fn list_goals(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Goal>>, AppError> {
    let goals = state.db.list_goals().map_err(AppError::from_core)?;
    Ok(Json(goals))
}

/// POST /api/goals - Analyse and save a goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GoalWithAdvice>, AppError> {
    let new_goal: NewGoal = parse_body(&body)?;
    let goal = state.db.add_goal(&new_goal).map_err(AppError::from_core)?;
    info!(goal_id = goal.id, "Saved goal '{}'", goal.name);

    let plan = GoalPlan::for_goal(goal, state.clock.today());
    Ok(Json(GoalWithAdvice::from_plan(plan, &state.config.currency)))
}

/// GET /api/goals/:id
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Goal>, AppError> {
    let goal = state
        .db
        .get_goal(id)?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;
    Ok(Json(goal))
}

/// GET /api/goals/:id/advice - Re-evaluate a saved goal against today
pub async fn get_goal_advice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<GoalWithAdvice>, AppError> {
    let plan = Reporter::new(&state.db)
        .plan(id, state.clock.today())
        .map_err(AppError::from_core)?;
    Ok(Json(GoalWithAdvice::from_plan(plan, &state.config.currency)))
}

/// Request body for the stand-alone calculator
#[derive(Debug, Deserialize)]
pub struct AdvisorRequest {
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    pub deadline: String,
}

/// POST /api/advisor - Calculate without persisting anything
pub async fn advise(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AdviceResponse>, AppError> {
    let req: AdvisorRequest = parse_body(&body)?;
    let advice = advisor::calculate_with(state.clock.as_ref(), req.target, req.current, &req.deadline);
    Ok(Json(AdviceResponse::new(&advice, &state.config.currency)))
}
