//! Policy assignment API endpoints
//!
//! Assignments propagate asynchronously. Creation and deletion return before
//! propagation completes; [`IamClient::wait_for_assignment`] and
//! [`IamClient::wait_for_assignment_deleted`] block until the service
//! reports a terminal outcome.

use serde::Deserialize;

use crate::IamClient;
use crate::error::{ClientError, Result};
use crate::wait::{self, Poll, WaitOptions};
use meridian_core::domain::assignment::{AssignmentStatus, PolicyAssignment};
use meridian_core::dto::template::CreateAssignment;

#[derive(Deserialize)]
struct AssignmentCollection {
    assignments: Vec<PolicyAssignment>,
}

impl IamClient {
    /// List the policy assignments in an account
    pub async fn list_assignments(&self, account_id: &str) -> Result<Vec<PolicyAssignment>> {
        let collection: AssignmentCollection = self
            .transport()
            .get_with_query("/v1/policy_assignments", &[("account_id", account_id)])
            .await?;
        Ok(collection.assignments)
    }

    /// Assign a committed template version to a target
    ///
    /// The returned assignment is usually still `accepted`; follow up with
    /// [`IamClient::wait_for_assignment`] to observe the outcome.
    pub async fn create_assignment(&self, req: CreateAssignment) -> Result<PolicyAssignment> {
        req.validate()?;
        self.transport().post("/v1/policy_assignments", &req).await
    }

    /// Get an assignment by ID
    pub async fn get_assignment(&self, assignment_id: &str) -> Result<PolicyAssignment> {
        self.transport()
            .get(&format!("/v1/policy_assignments/{}", assignment_id))
            .await
    }

    /// Remove an assignment, retracting the policies it created
    pub async fn delete_assignment(&self, assignment_id: &str) -> Result<()> {
        self.transport()
            .delete(&format!("/v1/policy_assignments/{}", assignment_id))
            .await
    }

    /// Wait until an assignment finishes propagating
    ///
    /// Polls the assignment per `options`. `accepted` and `in_progress`
    /// keep the wait going; `succeeded` resolves with the terminal
    /// assignment; `failed` resolves to [`ClientError::AssignmentFailed`]
    /// carrying the per-resource error detail; a status this crate does not
    /// recognize resolves to [`ClientError::UnexpectedStatus`]. A failed
    /// read aborts the wait immediately.
    pub async fn wait_for_assignment(
        &self,
        assignment_id: &str,
        options: WaitOptions,
    ) -> Result<PolicyAssignment> {
        let resource = format!("policy assignment {}", assignment_id);
        wait::poll_until(&resource, &options, || async move {
            let assignment = self.get_assignment(assignment_id).await?;
            match assignment.status {
                AssignmentStatus::Accepted | AssignmentStatus::InProgress => Ok(Poll::Pending),
                AssignmentStatus::Succeeded => Ok(Poll::Done(assignment)),
                AssignmentStatus::Failed => {
                    let details = assignment.failure_details();
                    let detail = if details.is_empty() {
                        "no error detail reported".to_string()
                    } else {
                        details.join("; ")
                    };
                    Err(ClientError::AssignmentFailed {
                        id: assignment_id.to_string(),
                        detail,
                    })
                }
                AssignmentStatus::Unknown => Err(ClientError::UnexpectedStatus {
                    resource: format!("policy assignment {}", assignment_id),
                    status: assignment.status.to_string(),
                }),
            }
        })
        .await
    }

    /// Wait until a deleted assignment is gone
    ///
    /// The service removes the assignment record once retraction completes,
    /// so a 404 is the success condition. `failed` resolves to
    /// [`ClientError::AssignmentFailed`]; any other status keeps the wait
    /// going until the timeout.
    pub async fn wait_for_assignment_deleted(
        &self,
        assignment_id: &str,
        options: WaitOptions,
    ) -> Result<()> {
        let resource = format!("deletion of policy assignment {}", assignment_id);
        wait::poll_until(&resource, &options, || async move {
            match self.get_assignment(assignment_id).await {
                Err(err) if err.is_not_found() => Ok(Poll::Done(())),
                Err(err) => Err(err),
                Ok(assignment) if assignment.status == AssignmentStatus::Failed => {
                    let details = assignment.failure_details();
                    let detail = if details.is_empty() {
                        "retraction failed with no error detail".to_string()
                    } else {
                        details.join("; ")
                    };
                    Err(ClientError::AssignmentFailed {
                        id: assignment_id.to_string(),
                        detail,
                    })
                }
                Ok(_) => Ok(Poll::Pending),
            }
        })
        .await
    }
}
