pub mod json_api;

pub use json_api::{
    balance_json, recompute_json, request_schema, BalanceRequest, BalanceResponse,
    ParticipantInput, RecomputeRequest, RecomputeResponse, StatusPayload, SCHEMA_VERSION,
};
