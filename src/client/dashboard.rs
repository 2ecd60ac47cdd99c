use super::SecureSightClient;
use crate::db::models::incident_models::IncidentWithCamera;
use crate::db::models::user_models::User;
use anyhow::Result;
use log::error;

/// List and selection state behind the incident dashboard.
///
/// Kept free of I/O so the optimistic-update transitions can be tested
/// without a server.
#[derive(Debug, Default)]
pub struct IncidentListState {
    incidents: Vec<IncidentWithCamera>,
    selected: Option<i32>,
}

impl IncidentListState {
    pub fn incidents(&self) -> &[IncidentWithCamera] {
        &self.incidents
    }

    /// The incident shown in the detail pane, if any.
    pub fn selected(&self) -> Option<&IncidentWithCamera> {
        let id = self.selected?;
        self.incidents.iter().find(|entry| entry.incident.id == id)
    }

    /// Replace the list with a freshly fetched one.
    ///
    /// An existing selection survives if its incident is still present;
    /// otherwise the first incident is selected.
    pub fn replace(&mut self, incidents: Vec<IncidentWithCamera>) {
        self.incidents = incidents;
        let still_present = self
            .selected
            .map(|id| self.incidents.iter().any(|entry| entry.incident.id == id))
            .unwrap_or(false);
        if !still_present {
            self.selected = self.incidents.first().map(|entry| entry.incident.id);
        }
    }

    /// Select an incident for the detail pane. Returns false if the id is
    /// not in the list.
    pub fn select(&mut self, id: i32) -> bool {
        if self.incidents.iter().any(|entry| entry.incident.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Optimistically remove an incident before server confirmation.
    ///
    /// When the removed incident was selected, the selection advances to
    /// the first remaining entry.
    pub fn remove(&mut self, id: i32) -> Option<IncidentWithCamera> {
        let position = self
            .incidents
            .iter()
            .position(|entry| entry.incident.id == id)?;
        let removed = self.incidents.remove(position);
        if self.selected == Some(id) {
            self.selected = self.incidents.first().map(|entry| entry.incident.id);
        }
        Some(removed)
    }
}

/// Incident dashboard flow: unresolved list, detail selection, and
/// optimistic resolve with refetch-on-failure.
pub struct Dashboard {
    client: SecureSightClient,
    pub state: IncidentListState,
}

impl Dashboard {
    pub fn new(client: SecureSightClient) -> Self {
        Self {
            client,
            state: IncidentListState::default(),
        }
    }

    /// Fetch the unresolved incidents and replace the local list.
    pub async fn refresh(&mut self) -> Result<()> {
        let incidents = self.client.incidents(Some(false)).await?;
        self.state.replace(incidents);
        Ok(())
    }

    /// Resolve an incident.
    ///
    /// The incident is removed from the local list before the request is
    /// sent. On failure the full list is re-fetched to resynchronize with
    /// the server rather than restoring the removed entry.
    pub async fn resolve(&mut self, id: i32) -> Result<()> {
        self.state.remove(id);
        if let Err(e) = self.client.resolve_incident(id).await {
            error!("Error resolving incident: {}", e);
            self.refresh().await?;
        }
        Ok(())
    }
}

/// User directory flow: list on load, create via form, re-fetch after a
/// successful create.
pub struct UserDirectory {
    client: SecureSightClient,
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(client: SecureSightClient) -> Self {
        Self {
            client,
            users: Vec::new(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.users = self.client.users().await?;
        Ok(())
    }

    /// Create a user, then re-fetch the list so it reflects the server
    /// state rather than patching locally.
    pub async fn create(&mut self, name: &str, email: &str) -> Result<User> {
        let user = self.client.create_user(name, email).await?;
        self.refresh().await?;
        Ok(user)
    }
}
