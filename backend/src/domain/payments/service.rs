//! Payment use cases.

use std::sync::Arc;

use pagination::{PageRequest, Paginated};
use tracing::{debug, info};

use crate::domain::ports::{
    Patch, PaymentRepository, ReservationRepository, SubscriptionRepository, repository_failure,
};
use crate::domain::reservations::ReservationError;
use crate::domain::subscriptions::SubscriptionError;
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, PaymentId, UserId};

use super::{
    NewPayment, Payment, PaymentChanges, PaymentError, PaymentMethod, PaymentRequest,
    PaymentStatus, PaymentTarget,
};

pub struct PaymentService<P, V, S> {
    payments: Arc<P>,
    reservations: Arc<V>,
    subscriptions: Arc<S>,
}

impl<P, V, S> Clone for PaymentService<P, V, S> {
    fn clone(&self) -> Self {
        Self {
            payments: Arc::clone(&self.payments),
            reservations: Arc::clone(&self.reservations),
            subscriptions: Arc::clone(&self.subscriptions),
        }
    }
}

impl<P, V, S> PaymentService<P, V, S>
where
    P: PaymentRepository,
    V: ReservationRepository,
    S: SubscriptionRepository,
{
    pub fn new(payments: Arc<P>, reservations: Arc<V>, subscriptions: Arc<S>) -> Self {
        Self {
            payments,
            reservations,
            subscriptions,
        }
    }

    /// Record a pending payment made by the caller.
    pub async fn create(&self, actor: &Actor, request: PaymentRequest) -> Result<Payment, Error> {
        request.validate()?;
        let method: PaymentMethod = request.method.parse().map_err(PaymentError::from)?;
        let target = request
            .target()
            .ok_or_else(|| Error::invalid_request("payment target is ambiguous"))?;
        self.ensure_payable(actor, target).await?;

        let payment = self
            .payments
            .create(NewPayment {
                payer_id: actor.user_id,
                target,
                amount: request.amount,
                method,
            })
            .await
            .map_err(repository_failure("create payment"))?;
        info!(payment_id = %payment.id, amount = %payment.amount, method = %payment.method, "payment recorded");
        Ok(payment)
    }

    pub async fn get(&self, actor: &Actor, id: PaymentId) -> Result<Payment, Error> {
        let payment = self.load(id).await?;
        if !actor.acts_for(payment.payer_id) {
            return Err(PaymentError::NotPayer {
                id,
                user_id: actor.user_id,
            }
            .into());
        }
        Ok(payment)
    }

    pub async fn list_for_payer(
        &self,
        actor: &Actor,
        payer_id: UserId,
        page: &PageRequest,
    ) -> Result<Paginated<Payment>, Error> {
        if !actor.acts_for(payer_id) {
            return Err(PaymentError::ForeignPayer {
                user_id: actor.user_id,
            }
            .into());
        }
        let slice = self
            .payments
            .find_page_by_payer(&payer_id, page)
            .await
            .map_err(repository_failure("list payments"))?;
        Ok(slice.into_paginated(page)?)
    }

    pub async fn mark_completed(&self, actor: &Actor, id: PaymentId) -> Result<Payment, Error> {
        self.settle(actor, id, PaymentStatus::Completed).await
    }

    pub async fn mark_failed(&self, actor: &Actor, id: PaymentId) -> Result<Payment, Error> {
        self.settle(actor, id, PaymentStatus::Failed).await
    }

    pub async fn refund(&self, actor: &Actor, id: PaymentId) -> Result<Payment, Error> {
        self.settle(actor, id, PaymentStatus::Refunded).await
    }

    async fn settle(
        &self,
        actor: &Actor,
        id: PaymentId,
        next: PaymentStatus,
    ) -> Result<Payment, Error> {
        if !actor.is_admin() {
            return Err(PaymentError::AdminRequired.into());
        }
        let payment = self.load(id).await?;
        if !payment.status.can_become(next) {
            debug!(payment_id = %id, from = %payment.status, to = %next, "payment transition rejected");
            return Err(PaymentError::InvalidTransition {
                id,
                from: payment.status,
                to: next,
            }
            .into());
        }

        let changes = PaymentChanges { status: Some(next) };
        let updated = self
            .payments
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("update payment status"))?
            .ok_or(PaymentError::NotFound(id))?;
        info!(payment_id = %id, status = %next, "payment status changed");
        Ok(updated)
    }

    async fn ensure_payable(&self, actor: &Actor, target: PaymentTarget) -> Result<(), Error> {
        match target {
            PaymentTarget::Reservation(id) => {
                let reservation = self
                    .reservations
                    .find_by_id(&id)
                    .await
                    .map_err(repository_failure("load reservation"))?
                    .ok_or(ReservationError::NotFound(id))?;
                if reservation.customer_id != actor.user_id {
                    return Err(PaymentError::NotReservationCustomer {
                        user_id: actor.user_id,
                    }
                    .into());
                }
            }
            PaymentTarget::Subscription(id) => {
                let subscription = self
                    .subscriptions
                    .find_by_id(&id)
                    .await
                    .map_err(repository_failure("load subscription"))?
                    .ok_or(SubscriptionError::NotFound(id))?;
                if subscription.owner_id != actor.user_id {
                    return Err(PaymentError::NotSubscriptionHolder {
                        user_id: actor.user_id,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    async fn load(&self, id: PaymentId) -> Result<Payment, Error> {
        self.payments
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load payment"))?
            .ok_or_else(|| PaymentError::NotFound(id).into())
    }
}
