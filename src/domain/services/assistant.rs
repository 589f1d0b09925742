use serde::Deserialize;

use crate::domain::models::crm::Message;
use crate::domain::models::lead::Lead;
use crate::domain::models::professional::Professional;
use crate::domain::models::service::Service;
use crate::domain::ports::ChatTurn;
use crate::error::AppError;

pub const SYSTEM_PROMPT: &str = r#"Você é o assistente virtual de uma barbearia. Responda sempre em português, de forma curta e cordial, como numa conversa de WhatsApp.

Você pode: tirar dúvidas sobre serviços e preços, sugerir horários e registrar pedidos de agendamento. Nunca invente serviços, profissionais ou horários.

Responda SEMPRE com um único objeto JSON neste formato:
{
  "response": "texto para o cliente",
  "backend_log": {
    "current_stage": "lead | qualified | scheduled | client",
    "updated_fields": { "name": "...", "email": "..." },
    "tags_to_apply": ["..."],
    "automation_trigger": null,
    "suggested_task": { "title": "...", "type": "follow_up", "due_in_hours": 24 },
    "suggested_appointment": { "service": "...", "barber": "...", "preferred_time": "2030-01-15T14:00:00" }
  }
}

Todos os campos de backend_log são opcionais. Só preencha suggested_appointment quando o cliente confirmar serviço e horário. preferred_time deve ser um timestamp ISO 8601."#;

/// Lead fields the assistant is allowed to update. Anything else the model
/// emits in updated_fields is ignored.
pub const UPDATABLE_LEAD_FIELDS: [&str; 5] = ["name", "whatsapp", "email", "preferred_barber", "notes"];

#[derive(Debug, Default, Deserialize)]
pub struct SuggestedTask {
    pub title: String,
    #[serde(rename = "type", default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub due_in_hours: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestedAppointment {
    pub service: String,
    #[serde(default)]
    pub barber: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BackendLog {
    #[serde(default)]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub updated_fields: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub tags_to_apply: Vec<String>,
    #[serde(default)]
    pub automation_trigger: Option<String>,
    #[serde(default)]
    pub suggested_task: Option<SuggestedTask>,
    #[serde(default)]
    pub suggested_appointment: Option<SuggestedAppointment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssistantReply {
    pub response: String,
    #[serde(default)]
    pub backend_log: Option<BackendLog>,
}

/// Parses the model completion. A completion that is not the expected JSON
/// envelope is still usable as plain text, with no backend actions.
pub fn parse_reply(raw: &str) -> AssistantReply {
    serde_json::from_str(raw).unwrap_or_else(|_| AssistantReply {
        response: raw.to_string(),
        backend_log: None,
    })
}

/// Strict name resolution: an exact case-insensitive match wins, otherwise a
/// single substring match, otherwise the name is rejected. Multiple matches
/// are ambiguous and never guessed at.
pub fn resolve_professional<'a>(
    name: &str,
    professionals: &'a [Professional],
) -> Result<&'a Professional, AppError> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Err(AppError::Validation("professional name is empty".to_string()));
    }

    if let Some(found) = professionals.iter().find(|p| p.name.to_lowercase() == needle) {
        return Ok(found);
    }

    let mut matches = professionals
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only),
        (Some(_), Some(_)) => Err(AppError::Validation(format!(
            "professional name '{}' is ambiguous",
            name
        ))),
        _ => Err(AppError::NotFound(format!("professional '{}' not found", name))),
    }
}

pub fn resolve_service<'a>(name: &str, services: &'a [Service]) -> Result<&'a Service, AppError> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Err(AppError::Validation("service name is empty".to_string()));
    }

    if let Some(found) = services.iter().find(|s| s.name.to_lowercase() == needle) {
        return Ok(found);
    }

    let mut matches = services
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only),
        (Some(_), Some(_)) => Err(AppError::Validation(format!(
            "service name '{}' is ambiguous",
            name
        ))),
        _ => Err(AppError::NotFound(format!("service '{}' not found", name))),
    }
}

/// Applies the whitelisted updated_fields to the lead. Returns true when
/// anything actually changed.
pub fn apply_updated_fields(
    lead: &mut Lead,
    fields: &serde_json::Map<String, serde_json::Value>,
) -> bool {
    let mut changed = false;
    for (key, value) in fields {
        if !UPDATABLE_LEAD_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let Some(text) = value.as_str() else { continue };
        let text = Some(text.to_string());
        match key.as_str() {
            "name" => lead.name = text,
            "whatsapp" => lead.whatsapp = text,
            "email" => lead.email = text,
            "preferred_barber" => lead.preferred_barber = text,
            "notes" => lead.notes = text,
            _ => continue,
        }
        changed = true;
    }
    changed
}

/// Assembles the prompt: system instructions, then the stored history
/// oldest-first, then the incoming user message.
pub fn build_turns(lead: &Lead, history: &[Message], incoming: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() + 2);

    let mut system = SYSTEM_PROMPT.to_string();
    if let Some(name) = &lead.name {
        system.push_str(&format!("\n\nO cliente se chama {}.", name));
    }
    turns.push(ChatTurn { role: "system".to_string(), content: system });

    for message in history {
        turns.push(ChatTurn {
            role: message.role.clone(),
            content: message.content.clone(),
        });
    }

    turns.push(ChatTurn {
        role: "user".to_string(),
        content: incoming.to_string(),
    });

    turns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn professional(name: &str) -> Professional {
        Professional::new(name.to_string(), None, None, None)
    }

    #[test]
    fn parse_reply_accepts_envelope() {
        let raw = r#"{"response":"Claro!","backend_log":{"current_stage":"qualified","tags_to_apply":["vip"],"suggested_appointment":{"service":"Corte","barber":"Carlos","preferred_time":"2030-03-04T13:00:00"}}}"#;
        let reply = parse_reply(raw);
        assert_eq!(reply.response, "Claro!");
        let log = reply.backend_log.unwrap();
        assert_eq!(log.current_stage.as_deref(), Some("qualified"));
        assert_eq!(log.tags_to_apply, vec!["vip"]);
        let apt = log.suggested_appointment.unwrap();
        assert_eq!(apt.service, "Corte");
        assert_eq!(apt.barber.as_deref(), Some("Carlos"));
    }

    #[test]
    fn parse_reply_falls_back_to_plain_text() {
        let reply = parse_reply("Oi! Como posso ajudar?");
        assert_eq!(reply.response, "Oi! Como posso ajudar?");
        assert!(reply.backend_log.is_none());
    }

    #[test]
    fn exact_match_beats_substring() {
        let pros = vec![professional("Carlos"), professional("Carlos Eduardo")];
        let found = resolve_professional("carlos", &pros).unwrap();
        assert_eq!(found.name, "Carlos");
    }

    #[test]
    fn single_substring_match_resolves() {
        let pros = vec![professional("Carlos Eduardo"), professional("Rafael")];
        let found = resolve_professional("carlos", &pros).unwrap();
        assert_eq!(found.name, "Carlos Eduardo");
    }

    #[test]
    fn ambiguous_name_is_rejected() {
        let pros = vec![professional("Carlos Eduardo"), professional("Carlos Henrique")];
        assert!(matches!(
            resolve_professional("carlos", &pros),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let pros = vec![professional("Rafael")];
        assert!(matches!(
            resolve_professional("Marcos", &pros),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn updated_fields_respect_whitelist() {
        let mut lead = Lead::new(None, Some("5511999990000".to_string()), "whatsapp");
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(
            r#"{"name":"Ana","stage":"client","id":"evil","email":"ana@example.com"}"#,
        )
        .unwrap();
        assert!(apply_updated_fields(&mut lead, &fields));
        assert_eq!(lead.name.as_deref(), Some("Ana"));
        assert_eq!(lead.email.as_deref(), Some("ana@example.com"));
        assert_eq!(lead.stage, "lead");
        assert_ne!(lead.id, "evil");
    }

    #[test]
    fn turns_start_with_system_and_end_with_user() {
        let lead = Lead::new(Some("Ana".to_string()), None, "whatsapp");
        let history = vec![
            Message::new("c1".to_string(), "user", "Oi".to_string(), None),
            Message::new("c1".to_string(), "assistant", "Olá!".to_string(), None),
        ];
        let turns = build_turns(&lead, &history, "Quero cortar o cabelo");
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, "system");
        assert!(turns[0].content.contains("Ana"));
        assert_eq!(turns[3].role, "user");
        assert_eq!(turns[3].content, "Quero cortar o cabelo");
    }
}
