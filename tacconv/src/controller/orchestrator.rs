use super::action::{Action, Mode};
use super::history::{AttemptOutcome, History};
use super::state::{ModeUpdate, ViewState};
use crate::api::{CompilationRequest, CompilationResult, V2Response, ValidationResult};
use crate::context::AppContext;
use crate::error::{ClientError, FailureKind};
use crate::gateway::{GatewayError, HttpTransport};
use crate::health::HealthRecord;
use crate::notify::{NotificationCenter, Severity};
use crate::render::renderer::{
    render_assembly, render_compilation, render_health, render_health_failure,
    render_optimization, render_resources, render_validation,
};
use crate::render::view::Banner;
use std::cell::{Ref, RefCell};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

pub const HEALTH_PROGRESS: &str = "Checking API health status...";
pub const CLEARED: &str = "Interface cleared";

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    Failed(ClientError),
    /// The action was already pending; nothing was sent.
    Busy,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ActionOutcome::Failed(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// What a mode's response turned into.
enum Reply {
    Rendered(ModeUpdate),
    /// Rendered, but the service judged the source invalid.
    Invalid(ModeUpdate, String),
    /// `success: false` from a compile-family endpoint.
    Rejected(String),
}

/// Re-enables an action's control when dropped.
struct PendingGuard<'c> {
    pending: &'c RefCell<BTreeSet<Action>>,
    action: Action,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.borrow_mut().remove(&self.action);
        debug!(action = %self.action, "Control re-enabled");
    }
}

pub struct Controller<'a, T> {
    ctx: &'a AppContext<T>,
    view: RefCell<ViewState>,
    pending: RefCell<BTreeSet<Action>>,
    history: RefCell<History>,
    last_health: RefCell<Option<HealthRecord>>,
}

impl<'a, T: HttpTransport> Controller<'a, T> {
    pub fn new(ctx: &'a AppContext<T>) -> Self {
        Self {
            ctx,
            view: RefCell::new(ViewState::default()),
            pending: RefCell::new(BTreeSet::new()),
            history: RefCell::new(History::default()),
            last_health: RefCell::new(None),
        }
    }

    pub fn context(&self) -> &AppContext<T> {
        self.ctx
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.ctx.notifications
    }

    pub fn view(&self) -> Ref<'_, ViewState> {
        self.view.borrow()
    }

    pub fn history(&self) -> Ref<'_, History> {
        self.history.borrow()
    }

    pub fn last_health(&self) -> Option<HealthRecord> {
        self.last_health.borrow().clone()
    }

    /// False while the action is pending.
    pub fn is_enabled(&self, action: Action) -> bool {
        !self.pending.borrow().contains(&action)
    }

    /// Route an action to its handler.
    pub async fn dispatch(&self, action: Action, source: &str) -> ActionOutcome {
        match action {
            Action::Run(mode) => self.run(mode, source).await,
            Action::Health => self.check_health().await,
            Action::Clear => self.clear(),
        }
    }

    fn begin(&self, action: Action) -> Option<PendingGuard<'_>> {
        if !self.pending.borrow_mut().insert(action) {
            debug!(action = %action, "Action already pending");
            return None;
        }
        debug!(action = %action, "Action pending");
        Some(PendingGuard {
            pending: &self.pending,
            action,
        })
    }

    // =========================================================================
    // Result modes
    // =========================================================================

    /// Submit `source` in the given mode.
    pub async fn run(&self, mode: Mode, source: &str) -> ActionOutcome {
        let action = Action::Run(mode);
        let Some(_guard) = self.begin(action) else {
            return ActionOutcome::Busy;
        };

        let Some(request) = CompilationRequest::from_source(source) else {
            let message = mode.input_error();
            info!(action = %action, "Rejected empty source");
            self.view
                .borrow_mut()
                .set_banner(action, Banner::error(message));
            return ActionOutcome::Failed(ClientError::Input(message.to_string()));
        };

        self.view
            .borrow_mut()
            .set_banner(action, Banner::info(mode.progress_message()));

        let outcome = match self.fetch(mode, &request).await {
            Ok(Reply::Rendered(update)) => {
                let mut view = self.view.borrow_mut();
                view.clear_banner(action);
                view.apply(update);
                info!(action = %action, "Action succeeded");
                ActionOutcome::Completed
            }
            Ok(Reply::Invalid(update, message)) => {
                let mut view = self.view.borrow_mut();
                view.clear_banner(action);
                view.apply(update);
                info!(action = %action, "Source reported invalid");
                ActionOutcome::Failed(ClientError::Domain(message))
            }
            Ok(Reply::Rejected(message)) => {
                let message = if message.trim().is_empty() {
                    format!("{}.", mode.failure_prefix())
                } else {
                    message
                };
                self.view
                    .borrow_mut()
                    .set_banner(action, Banner::error(message.clone()));
                info!(action = %action, message = %message, "Service reported failure");
                ActionOutcome::Failed(ClientError::Domain(message))
            }
            Err(e) => {
                self.view.borrow_mut().clear_banner(action);
                warn!(action = %action, error = %e, "Request failed");
                self.ctx.notifications.notify(
                    Severity::Error,
                    format!("{}: {}", mode.failure_prefix(), e),
                );
                ActionOutcome::Failed(ClientError::Gateway(e))
            }
        };

        if mode.records_history() {
            let attempt = match &outcome {
                ActionOutcome::Failed(e) => AttemptOutcome::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                },
                _ => AttemptOutcome::Succeeded,
            };
            self.history
                .borrow_mut()
                .record(mode, &request.tac_code, attempt);
        }

        outcome
    }

    async fn fetch(&self, mode: Mode, request: &CompilationRequest) -> Result<Reply, GatewayError> {
        let gateway = &self.ctx.gateway;
        let timeout = self.ctx.request_timeout;
        let endpoint = mode.endpoint();

        match mode {
            Mode::Validate => {
                let result: ValidationResult =
                    gateway.call_typed(endpoint, Some(request), timeout).await?;
                let update = ModeUpdate::Validation(render_validation(&result));
                Ok(if result.valid {
                    Reply::Rendered(update)
                } else {
                    Reply::Invalid(update, result.message)
                })
            }
            Mode::Compile => {
                let result: CompilationResult =
                    gateway.call_typed(endpoint, Some(request), timeout).await?;
                if !result.success {
                    return Ok(Reply::Rejected(result.message));
                }
                Ok(Reply::Rendered(ModeUpdate::Compile(render_compilation(
                    &result,
                ))))
            }
            Mode::Complete => match self.fetch_v2(mode, request).await? {
                Ok(response) => {
                    let result = response.into_complete()?;
                    Ok(Reply::Rendered(ModeUpdate::Complete {
                        assembly: render_assembly(&result.assembly),
                        resources: render_resources(&result.analysis),
                        optimization: render_optimization(&result.optimization),
                    }))
                }
                Err(message) => Ok(Reply::Rejected(message)),
            },
            Mode::Assembly => match self.fetch_v2(mode, request).await? {
                Ok(response) => {
                    let result = response.into_assembly()?;
                    Ok(Reply::Rendered(ModeUpdate::Assembly(render_assembly(
                        &result,
                    ))))
                }
                Err(message) => Ok(Reply::Rejected(message)),
            },
            Mode::Resources => match self.fetch_v2(mode, request).await? {
                Ok(response) => {
                    let result = response.into_resources()?;
                    Ok(Reply::Rendered(ModeUpdate::Resources {
                        assembly: render_assembly(&result.assembly),
                        resources: render_resources(&result.analysis),
                    }))
                }
                Err(message) => Ok(Reply::Rejected(message)),
            },
            Mode::Optimize => match self.fetch_v2(mode, request).await? {
                Ok(response) => {
                    let result = response.into_optimization()?;
                    Ok(Reply::Rendered(ModeUpdate::Optimize(render_optimization(
                        &result,
                    ))))
                }
                Err(message) => Ok(Reply::Rejected(message)),
            },
        }
    }

    /// Call a `/v2` endpoint. The inner `Err` carries a reported failure.
    async fn fetch_v2(
        &self,
        mode: Mode,
        request: &CompilationRequest,
    ) -> Result<Result<V2Response, String>, GatewayError> {
        let response: V2Response = self
            .ctx
            .gateway
            .call_typed(mode.endpoint(), Some(request), self.ctx.request_timeout)
            .await?;
        if response.success {
            Ok(Ok(response))
        } else {
            Ok(Err(response.message))
        }
    }

    // =========================================================================
    // Health and housekeeping
    // =========================================================================

    /// Check the service and show the result in the health section.
    pub async fn check_health(&self) -> ActionOutcome {
        let action = Action::Health;
        let Some(_guard) = self.begin(action) else {
            return ActionOutcome::Busy;
        };

        self.view
            .borrow_mut()
            .set_banner(action, Banner::info(HEALTH_PROGRESS));

        match self.ctx.health.check(&self.ctx.gateway).await {
            Ok(record) => {
                let health_view = render_health(&record, self.ctx.api_base());
                {
                    let mut view = self.view.borrow_mut();
                    view.clear_banner(action);
                    view.show_health(health_view);
                }
                *self.last_health.borrow_mut() = Some(record);
                ActionOutcome::Completed
            }
            Err(e) => {
                {
                    let mut view = self.view.borrow_mut();
                    view.clear_banner(action);
                    view.show_health(render_health_failure(&e));
                }
                self.ctx
                    .notifications
                    .notify(Severity::Error, format!("Health check failed: {}", e));
                ActionOutcome::Failed(ClientError::Gateway(e))
            }
        }
    }

    /// The non-blocking check run once at startup.
    ///
    /// A failure only raises a warning notification.
    pub async fn startup_health_check(&self) -> Option<HealthRecord> {
        let record = self
            .ctx
            .health
            .startup_check(&self.ctx.gateway, &self.ctx.notifications)
            .await?;
        *self.last_health.borrow_mut() = Some(record.clone());
        Some(record)
    }

    /// Hide every section. History and the last health record are kept.
    pub fn clear(&self) -> ActionOutcome {
        self.view.borrow_mut().clear();
        self.ctx.notifications.notify(Severity::Info, CLEARED);
        ActionOutcome::Completed
    }
}
