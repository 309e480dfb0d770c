//! Port for payment persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::payments::{NewPayment, Payment, PaymentChanges};
use crate::domain::{PaymentId, UserId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type PaymentPatch = Patch<PaymentId, PaymentChanges>;

#[async_trait]
pub trait PaymentRepository:
    Repository<Entity = Payment, Id = PaymentId, CreateInput = NewPayment, UpdateInput = PaymentPatch>
{
    async fn find_page_by_payer(
        &self,
        payer_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Payment>, RepositoryError>;
}
