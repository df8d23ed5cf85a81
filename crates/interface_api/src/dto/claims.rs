//! Claims DTOs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use domain_billing::{BillingRecord, BillingStats, PaymentStatus, StatusTotals};

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub patient_id: String,
    pub patient_name: String,
    pub billing_code: String,
    pub amount: Decimal,
    pub currency: String,
    pub insurance_provider: String,
    pub payment_status: PaymentStatus,
    pub claim_date: NaiveDate,
}

impl From<&BillingRecord> for ClaimResponse {
    fn from(record: &BillingRecord) -> Self {
        Self {
            patient_id: record.patient_id().to_string(),
            patient_name: record.patient_name().to_string(),
            billing_code: record.billing_code().to_string(),
            amount: record.amount().amount(),
            currency: record.amount().currency().code().to_string(),
            insurance_provider: record.insurance_provider().to_string(),
            payment_status: record.payment_status(),
            claim_date: record.claim_date(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub claims: usize,
    pub amount: Decimal,
}

impl From<&StatusTotals> for TotalsResponse {
    fn from(totals: &StatusTotals) -> Self {
        Self {
            claims: totals.claims,
            amount: totals.amount.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: TotalsResponse,
    pub pending: TotalsResponse,
    pub approved: TotalsResponse,
    pub denied: TotalsResponse,
}

impl From<&BillingStats> for StatsResponse {
    fn from(stats: &BillingStats) -> Self {
        Self {
            total: (&stats.total).into(),
            pending: (&stats.pending).into(),
            approved: (&stats.approved).into(),
            denied: (&stats.denied).into(),
        }
    }
}

/// Claims per status; statuses with no claims are omitted
#[derive(Debug, Serialize)]
pub struct DistributionResponse {
    pub counts: BTreeMap<PaymentStatus, usize>,
}
