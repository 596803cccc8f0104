pub const PING: &str = r#"
SELECT 1;
"#;

pub const SELECT_STATION_ROWS: &str = r#"
SELECT to_jsonb(a) FROM t_ttccr_analise_pred a WHERE a.estacao = $1;
"#;

pub const SELECT_USER_EXISTS: &str = r#"
SELECT EXISTS (SELECT 1 FROM t_ttccr_usuario WHERE id_usuario = $1);
"#;

pub const INSERT_REPORT: &str = r#"
INSERT INTO t_ttccr_report_usuario (
    id_usuario, tipo_alerta, descricao_alerta, data_report, nome_anonimo, email_anonimo, estacao
) VALUES ($1, $2, $3, LOCALTIMESTAMP, $4, $5, $6)
RETURNING id_report;
"#;

pub const SELECT_REPORTS_FOR_USER: &str = r#"
SELECT
    r.id_report,
    r.tipo_alerta,
    r.descricao_alerta,
    r.data_report,
    r.estacao
FROM t_ttccr_report_usuario r
JOIN t_ttccr_usuario u ON r.id_usuario = u.id_usuario
WHERE r.id_usuario = $1
ORDER BY r.data_report DESC, r.id_report DESC;
"#;

pub const UPDATE_REPORT_DESCRIPTION: &str = r#"
UPDATE t_ttccr_report_usuario
SET descricao_alerta = $1
WHERE id_report = $2
  AND id_usuario = $3;
"#;

pub const DELETE_REPORT: &str = r#"
DELETE FROM t_ttccr_report_usuario
WHERE id_report = $1
  AND id_usuario = $2;
"#;
