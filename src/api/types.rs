//! Tipos de dados trocados com o endpoint `job/` da API de importação.
//!
//! Os nomes dos campos seguem o formato JSON do servidor (em espanhol);
//! `serde` faz a conversão direta sem renomear.

use serde::{Deserialize, Serialize};

use crate::monitor::{JobState, ReportFields};

/// Registro de estado devolvido por `GET`, `POST` e `PUT` em `job/{mun}/{div}`.
///
/// Todos os campos exceto `cod_municipio` e `report` são obrigatórios: uma
/// resposta incompleta é rejeitada inteira, nunca aplicada pela metade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Estado do ciclo de vida informado pelo servidor.
    pub estado: JobState,
    /// Mensagem legível para o usuário; substitui a anterior.
    pub mensaje: String,
    /// Código do município a que o registro se refere.
    #[serde(default)]
    pub cod_municipio: String,
    /// Novo valor do cursor de log.
    pub linea: u64,
    /// Linhas de log posteriores ao cursor enviado na requisição.
    pub log: Vec<String>,
    /// Identificadores das tarefas que exigem revisão manual.
    pub revisar: Vec<String>,
    /// Linhas do relatório final.
    pub informe: Vec<String>,
    /// Mapa esparso de campos do relatório (presença de datas etc.).
    #[serde(default)]
    pub report: ReportFields,
}

/// Corpo da requisição `POST` que inicia uma importação.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    /// Importar edifícios.
    pub building: bool,
    /// Importar endereços.
    pub address: bool,
    /// Idioma da importação (ex.: "es_ES", "ca_ES", "gl_ES").
    pub idioma: String,
}

/// Corpo de erro estruturado (`{"message": "..."}`) devolvido pela API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
