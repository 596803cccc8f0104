use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;

/// Wire format of `data_report` in listings.
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body of `POST /reports`. Every field is optional here so that a missing
/// field turns into a validation message instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateReportRequest {
    #[serde(default, deserialize_with = "parse_user_id")]
    pub id_usuario: Option<i64>,
    pub tipo_alerta: Option<String>,
    pub descricao_alerta: Option<String>,
    pub nome_anonimo: Option<String>,
    pub email_anonimo: Option<String>,
    pub estacao: Option<String>,
}

/// A validated report ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub id_usuario: Option<i64>,
    pub tipo_alerta: String,
    pub descricao_alerta: String,
    pub nome_anonimo: Option<String>,
    pub email_anonimo: Option<String>,
    pub estacao: String,
}

impl CreateReportRequest {
    /// Fields that must be filled for this request. Anonymous reports also
    /// need a name and an email.
    pub fn required_fields(&self) -> Vec<&'static str> {
        let mut fields = vec!["tipo_alerta", "descricao_alerta", "estacao"];
        if self.id_usuario.is_none() {
            fields.extend(["nome_anonimo", "email_anonimo"]);
        }
        fields
    }

    /// On failure returns the full list of required fields.
    pub fn validate(self) -> Result<NewReport, Vec<&'static str>> {
        let required = self.required_fields();

        let tipo_alerta = non_blank(self.tipo_alerta);
        let descricao_alerta = non_blank(self.descricao_alerta);
        let estacao = non_blank(self.estacao);
        let nome_anonimo = non_blank(self.nome_anonimo);
        let email_anonimo = non_blank(self.email_anonimo);

        let anonymous_ok = self.id_usuario.is_some()
            || (nome_anonimo.is_some() && email_anonimo.is_some());

        match (tipo_alerta, descricao_alerta, estacao) {
            (Some(tipo_alerta), Some(descricao_alerta), Some(estacao)) if anonymous_ok => {
                Ok(NewReport {
                    id_usuario: self.id_usuario,
                    tipo_alerta,
                    descricao_alerta,
                    nome_anonimo,
                    email_anonimo,
                    estacao,
                })
            }
            _ => Err(required),
        }
    }
}

/// Body of `PUT /reports/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReportRequest {
    pub nova_descricao: Option<String>,
}

/// One entry of a caller's report listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportSummary {
    pub id_report: i64,
    pub tipo_alerta: String,
    pub descricao_alerta: String,
    #[serde(serialize_with = "format_report_time")]
    pub data_report: NaiveDateTime,
    pub estacao: String,
}

#[derive(Debug, Serialize)]
pub struct ReportCreated {
    pub mensagem: String,
    pub id_report: i64,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn format_report_time<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(REPORT_TIME_FORMAT))
}

/// Clients send the user id either as a number or as a string. Zero and empty
/// strings mean "no user", same as leaving the field out.
fn parse_user_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        Int(i64),
        String(String),
    }

    let v: Option<StringOrInt> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOrInt::Int(0)) => Ok(None),
        Some(StringOrInt::Int(i)) => Ok(Some(i)),
        Some(StringOrInt::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                match s.parse::<i64>().map_err(serde::de::Error::custom)? {
                    0 => Ok(None),
                    i => Ok(Some(i)),
                }
            }
        }
        None => Ok(None),
    }
}
