//! Delivery log entity <-> model mapper

use scheduler_core::entities::{DeliveryKind, DeliveryLog, DeliveryStatus};
use scheduler_core::DomainError;

use super::{corrupt, parse_id};
use crate::models::DeliveryLogModel;

impl TryFrom<DeliveryLogModel> for DeliveryLog {
    type Error = DomainError;

    fn try_from(model: DeliveryLogModel) -> Result<Self, Self::Error> {
        Ok(DeliveryLog {
            id: parse_id("delivery_logs.id", &model.id)?,
            kind: DeliveryKind::parse(&model.kind)
                .ok_or_else(|| corrupt("delivery_logs.kind", &model.kind))?,
            recipient: model.recipient,
            reference_id: parse_id("delivery_logs.reference_id", &model.reference_id)?,
            status: DeliveryStatus::parse(&model.status)
                .ok_or_else(|| corrupt("delivery_logs.status", &model.status))?,
            error: model.error,
            created_at: model.created_at,
        })
    }
}
