use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{self, Envelope};
use crate::errors::AppError;
use crate::forms::wizard::AssistantForm;
use crate::forms::{AssistantWizard, WizardPatch, WizardStep};
use crate::models::{Assistant, User};
use crate::session::Session;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UserChoice {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserChoice {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.full_name(),
            email: u.email.clone(),
        }
    }
}

/// What the wizard screen renders.
#[derive(Serialize)]
pub struct WizardView {
    pub id: Uuid,
    pub step: WizardStep,
    pub step_number: usize,
    pub step_title: &'static str,
    pub is_last_step: bool,
    pub form: AssistantForm,
    pub users: Vec<UserChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub can_submit: bool,
    pub submitting: bool,
}

impl WizardView {
    fn new(id: Uuid, wizard: &AssistantWizard) -> Self {
        let step = wizard.step();
        Self {
            id,
            step,
            step_number: step.index() + 1,
            step_title: step.title(),
            is_last_step: step.is_last(),
            form: wizard.form().clone(),
            users: wizard.approved_users().iter().map(UserChoice::from).collect(),
            notice: wizard.notice(),
            can_submit: wizard.can_submit(),
            submitting: wizard.is_submitting(),
        }
    }
}

fn with_draft<T>(
    state: &AppState,
    id: Uuid,
    owner: &str,
    f: impl FnOnce(&mut AssistantWizard) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut drafts = state.drafts.lock().unwrap();
    let wizard = drafts
        .get_mut(&id, owner, Utc::now())
        .ok_or_else(|| AppError::NotFound(format!("wizard draft {id}")))?;
    f(wizard)
}

// POST /api/wizard
pub async fn start(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Envelope<WizardView>>, AppError> {
    let token = session.require_token()?;
    let users = api::users::approved_with_token(&state.api, &token).await?;

    let wizard = AssistantWizard::new(users);
    let id = state
        .drafts
        .lock()
        .unwrap()
        .insert(&token, wizard.clone(), Utc::now());
    let view = WizardView::new(id, &wizard);

    tracing::debug!("started wizard draft {id}");
    Ok(Json(Envelope::ok("Wizard started", view)))
}

// GET /api/wizard/:id
pub async fn show(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<WizardView>>, AppError> {
    let token = session.require_token()?;
    let view = with_draft(&state, id, &token, |w| Ok(WizardView::new(id, w)))?;
    Ok(Json(Envelope::ok("Wizard", view)))
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum PatchBody {
    Many(Vec<WizardPatch>),
    One(WizardPatch),
}

// PATCH /api/wizard/:id
pub async fn patch(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(body): Json<PatchBody>,
) -> Result<Json<Envelope<WizardView>>, AppError> {
    let token = session.require_token()?;
    let patches = match body {
        PatchBody::Many(p) => p,
        PatchBody::One(p) => vec![p],
    };

    // A batch lands whole or not at all.
    let view = with_draft(&state, id, &token, |w| {
        let mut staged = w.clone();
        for p in patches {
            staged.apply(p)?;
        }
        *w = staged;
        Ok(WizardView::new(id, w))
    })?;
    Ok(Json(Envelope::ok("Wizard updated", view)))
}

// POST /api/wizard/:id/next
pub async fn next(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<WizardView>>, AppError> {
    let token = session.require_token()?;
    let view = with_draft(&state, id, &token, |w| {
        w.next();
        Ok(WizardView::new(id, w))
    })?;
    Ok(Json(Envelope::ok("Wizard", view)))
}

// POST /api/wizard/:id/previous
pub async fn previous(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<WizardView>>, AppError> {
    let token = session.require_token()?;
    let view = with_draft(&state, id, &token, |w| {
        w.previous();
        Ok(WizardView::new(id, w))
    })?;
    Ok(Json(Envelope::ok("Wizard", view)))
}

// POST /api/wizard/:id/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Assistant>>>, AppError> {
    let token = session.require_token()?;

    let request = with_draft(&state, id, &token, |w| {
        let request = w.submission().map_err(AppError::Validation)?;
        if !w.begin_submit() {
            return Err(AppError::Conflict("Submission already in progress".to_string()));
        }
        Ok(request)
    })?;

    let result = api::assistants::create(&state.api, &token, &request).await;

    let mut drafts = state.drafts.lock().unwrap();
    match result {
        Ok(assistants) => {
            drafts.remove(&id, &token);
            tracing::info!("created {} assistant(s) from wizard {id}", assistants.len());
            Ok(Json(Envelope::ok("Assistant created", assistants)))
        }
        Err(e) => {
            if let Some(w) = drafts.get_mut(&id, &token, Utc::now()) {
                w.end_submit();
            }
            Err(e.into())
        }
    }
}

// DELETE /api/wizard/:id
pub async fn discard(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, AppError> {
    let token = session.require_token()?;
    state
        .drafts
        .lock()
        .unwrap()
        .remove(&id, &token)
        .ok_or_else(|| AppError::NotFound(format!("wizard draft {id}")))?;
    Ok(Json(Envelope::ok("Wizard discarded", ())))
}
