//! User-facing failure taxonomy.
//!
//! Store-unreachable conditions never surface here; they are caught at the
//! storage call sites and turn into local-fallback reads or a resync. This
//! enum covers the failures a client is told about inline.

use thiserror::Error;

use super::models::AppointmentStatus;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error("horário {date} {time} já está reservado")]
    SlotTaken { date: String, time: String },

    #[error("transição de status inválida: {from} -> {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("agendamento não encontrado: {0}")]
    AppointmentNotFound(String),

    #[error("serviço não encontrado: {0}")]
    UnknownService(String),

    #[error("veículo não encontrado: {0}")]
    UnknownVehicle(String),

    #[error("data fora da janela de agendamento: {0}")]
    DateOutOfWindow(String),

    #[error("horário inválido: {0}")]
    InvalidTimeSlot(String),

    #[error("telefone já cadastrado")]
    DuplicatePhone,

    #[error("telefone ou senha incorretos")]
    BadCredentials,

    #[error("agendamento requer login")]
    AuthRequired,
}
