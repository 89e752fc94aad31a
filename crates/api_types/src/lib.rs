//! JSON bodies exchanged by the FinOrg HTTP API.
//!
//! Request payloads keep every field optional: the same payload serves
//! create (where the server checks required fields) and merge-patch update
//! (where an absent or `null` field keeps the stored value). Wire names are
//! the Portuguese keys clients already send.

use serde::{Deserialize, Serialize};

/// A decimal value sent either as a JSON number (`12.5`) or as a string
/// (`"12,50"`). The server parses the text form into fixed-point.
///
/// Integers keep every digit. Fractional numbers go through `f64`, so
/// clients needing exact large values send the string form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    Number(serde_json::Number),
    Text(String),
}

impl DecimalInput {
    /// Text form handed to the fixed-point parser.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// `201` body for a successful create.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub mensagem: String,
    pub id: i32,
}

/// `200` body for a successful update or delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub mensagem: String,
}

/// `{id, nome}` pair used for lookups and embedded summaries.
#[derive(Debug, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i32,
    pub nome: String,
}

pub mod account_type {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AccountTypePayload {
        #[serde(rename = "tipos_contas")]
        pub name: Option<String>,
    }
}

pub mod transaction_type {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionTypePayload {
        #[serde(rename = "tipos_operacoes")]
        pub name: Option<String>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryPayload {
        #[serde(rename = "categorias_nome")]
        pub name: Option<String>,
        #[serde(rename = "categorias_classe")]
        pub class: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        pub nome: String,
        pub classe: i32,
        pub subcategorias: Vec<NamedRef>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SubcategoryPayload {
        #[serde(rename = "subcategorias_nome")]
        pub name: Option<String>,
        #[serde(rename = "subcategorias_classe")]
        pub class: Option<i32>,
        /// Only honoured on update: moves the subcategory.
        #[serde(rename = "categorias_id")]
        pub category_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubcategoryView {
        pub id: i32,
        pub nome: String,
        pub classe: Option<i32>,
        pub categoria_id: i32,
    }
}

pub mod currency {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CurrencyPayload {
        #[serde(rename = "moedas_nome")]
        pub name: Option<String>,
        #[serde(rename = "moedas_simbolo")]
        pub symbol: Option<String>,
        #[serde(rename = "moedas_cotacao")]
        pub exchange_rate: Option<DecimalInput>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyView {
        pub id: i32,
        pub nome: String,
        pub simbolo: String,
        /// Four decimal places, e.g. `"5.1234"`.
        pub cotacao: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyRef {
        pub id: i32,
        pub nome: String,
        pub simbolo: String,
    }
}

pub mod bank_account {
    use super::*;
    use crate::currency::CurrencyRef;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BankAccountPayload {
        #[serde(rename = "nome_conta")]
        pub name: Option<String>,
        #[serde(rename = "tipo_conta")]
        pub account_type_id: Option<i32>,
        #[serde(rename = "conta_saldo_inicial")]
        pub initial_balance: Option<DecimalInput>,
        #[serde(
            rename = "data_conta_saldo_incial",
            alias = "data_conta_saldo_inicial"
        )]
        pub initial_balance_date: Option<String>,
        #[serde(rename = "moeda_id")]
        pub currency_id: Option<i32>,
        #[serde(rename = "limite_credito")]
        pub credit_limit: Option<DecimalInput>,
        #[serde(rename = "liquidez")]
        pub liquidity: Option<bool>,
        #[serde(rename = "dia_fechamento")]
        pub closing_day: Option<i32>,
        #[serde(rename = "dia_previsao_debito")]
        pub debit_day: Option<i32>,
        #[serde(rename = "ignorar_saldo")]
        pub ignore_balance: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BankAccountView {
        pub id: i32,
        pub nome: String,
        pub tipo_conta: Option<NamedRef>,
        pub saldo_inicial: Option<String>,
        pub data_saldo_inicial: Option<String>,
        pub moeda: Option<CurrencyRef>,
        pub limite_credito: Option<String>,
        pub liquidez: bool,
        pub dia_fechamento: Option<i32>,
        pub dia_previsao_debito: Option<i32>,
        pub ignorar_saldo: bool,
    }
}

pub mod card {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CardPayload {
        #[serde(rename = "cartoes_nome")]
        pub name: Option<String>,
        #[serde(rename = "cartoes_final")]
        pub last_digits: Option<String>,
        #[serde(rename = "cartoes_tipo")]
        pub kind: Option<String>,
        #[serde(rename = "cartoes_conta_vinculada")]
        pub linked_account: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementRef {
        pub id: i32,
        pub vencimento: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardView {
        pub id: i32,
        pub nome: String,
        #[serde(rename = "final")]
        pub last_digits: String,
        pub tipo: String,
        pub conta_vinculada: bool,
        pub faturas: Vec<StatementRef>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CardStatementPayload {
        #[serde(rename = "faturasCartoesDtVencimento")]
        pub due_date: Option<String>,
        #[serde(rename = "faturasCartoesFechamento")]
        pub closing_date: Option<String>,
        #[serde(rename = "faturasCartoesValor")]
        pub amount: Option<DecimalInput>,
        #[serde(rename = "faturasCartoesFechada")]
        pub closed: Option<bool>,
        #[serde(rename = "faturasCartoesMesAno")]
        pub month_year: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardStatementView {
        pub id: i32,
        pub cartao_id: i32,
        pub vencimento: String,
        pub fechamento: String,
        pub valor: String,
        pub fechada: bool,
        pub mes_ano: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionPayload {
        #[serde(rename = "operacoes_tipo")]
        pub type_id: Option<i32>,
        #[serde(rename = "operacoes_descricao")]
        pub description: Option<String>,
        #[serde(rename = "operacoes_data")]
        pub posting_date: Option<String>,
        #[serde(rename = "operacoes_valor")]
        pub amount: Option<DecimalInput>,
        #[serde(rename = "contas_bancarias_id")]
        pub account_id: Option<i32>,
        #[serde(rename = "subcategorias_id")]
        pub subcategory_id: Option<i32>,
        #[serde(rename = "operacoes_transferencia")]
        pub transfer_id: Option<i32>,
        #[serde(rename = "operacoes_parcela")]
        pub installment: Option<i32>,
        #[serde(rename = "faturas_cartoes_id")]
        pub statement_id: Option<i32>,
        #[serde(rename = "cartoes_id")]
        pub card_id: Option<i32>,
        #[serde(rename = "operacoes_recorrencia")]
        pub recurrence_id: Option<i32>,
        #[serde(rename = "projetos_id")]
        pub project_id: Option<i32>,
        #[serde(rename = "operacoes_data_efetivacao")]
        pub effective_date: Option<String>,
        #[serde(rename = "operacoes_efetivado")]
        pub effective: Option<bool>,
        #[serde(rename = "operacoes_validado")]
        pub validated: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubcategoryRef {
        pub id: i32,
        pub nome: String,
        /// Name of the parent category.
        pub categoria: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i32,
        /// Transaction type id.
        pub tipo: i32,
        pub descricao: String,
        pub data: String,
        pub valor: String,
        pub conta: Option<NamedRef>,
        pub subcategoria: Option<SubcategoryRef>,
        pub transferencia: Option<i32>,
        pub parcela: Option<i32>,
        pub fatura_id: Option<i32>,
        pub cartao_id: Option<i32>,
        pub recorrencia_id: Option<i32>,
        pub projeto_id: Option<i32>,
        pub data_efetivacao: Option<String>,
        pub efetivado: bool,
        pub validado: bool,
    }
}

pub mod recurrence {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RecurringTemplatePayload {
        #[serde(rename = "recorrencia_descricao")]
        pub description: Option<String>,
        #[serde(rename = "recorrencia_valor")]
        pub amount: Option<DecimalInput>,
        #[serde(rename = "recorrencia_tipo")]
        pub type_id: Option<i32>,
        #[serde(rename = "recorrencia_categoria")]
        pub category_id: Option<i32>,
        #[serde(rename = "recorrencia_data")]
        pub posting_date: Option<String>,
        #[serde(rename = "recorrencia_conta")]
        pub account_id: Option<i32>,
        #[serde(rename = "recorrencia_fatura")]
        pub statement_id: Option<i32>,
        #[serde(rename = "recorrencia_antecedencia")]
        pub lead_time: Option<i32>,
        #[serde(rename = "recorrencia_validado")]
        pub validated: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringTemplateView {
        pub id: i32,
        pub descricao: String,
        pub valor: String,
        pub tipo: i32,
        pub categoria: i32,
        pub fatura: Option<i32>,
        pub data: Option<String>,
        pub conta: Option<i32>,
        pub antecedencia: Option<i32>,
        pub validado: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RecurrenceRulePayload {
        #[serde(rename = "operacao_id")]
        pub transaction_id: Option<i32>,
        #[serde(rename = "recorrencia_descricao")]
        pub description: Option<String>,
        #[serde(rename = "frequencia")]
        pub frequency: Option<String>,
        #[serde(rename = "data_inicio")]
        pub start_date: Option<String>,
        #[serde(rename = "data_fim")]
        pub end_date: Option<String>,
        pub status: Option<String>,
        #[serde(rename = "ultimo_lancamento")]
        pub last_posted_date: Option<String>,
        #[serde(rename = "dias_uteis")]
        pub business_days: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurrenceRuleView {
        pub id: i32,
        pub operacao_id: i32,
        pub descricao: Option<String>,
        pub frequencia: String,
        pub data_inicio: String,
        pub data_fim: Option<String>,
        pub status: String,
        pub ultimo_lancamento: Option<String>,
        pub dias_uteis: bool,
    }
}

pub mod project {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProjectPayload {
        #[serde(rename = "projetos_nome")]
        pub name: Option<String>,
        #[serde(rename = "projetos_data_inicio")]
        pub start_date: Option<String>,
        #[serde(rename = "projetos_data_fim")]
        pub end_date: Option<String>,
        #[serde(rename = "projetos_cor")]
        pub color: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectView {
        pub id: i32,
        pub nome: String,
        pub data_inicio: Option<String>,
        pub data_fim: Option<String>,
        pub cor: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_input_accepts_number_or_string() {
        let n: DecimalInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(n.as_text(), "12.5");
        let i: DecimalInput = serde_json::from_str("10").unwrap();
        assert_eq!(i.as_text(), "10");
        let s: DecimalInput = serde_json::from_str("\"12,50\"").unwrap();
        assert_eq!(s.as_text(), "12,50");
        assert!(serde_json::from_str::<DecimalInput>("true").is_err());
    }

    #[test]
    fn integers_past_f64_precision_keep_every_digit() {
        let n: DecimalInput = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(n.as_text(), "9007199254740993");
        let neg: DecimalInput = serde_json::from_str("-9007199254740993").unwrap();
        assert_eq!(neg.as_text(), "-9007199254740993");
    }

    #[test]
    fn payload_fields_are_optional() {
        let body: transaction::TransactionPayload = serde_json::from_str("{}").unwrap();
        assert!(body.description.is_none());
        assert!(body.amount.is_none());

        let body: account_type::AccountTypePayload =
            serde_json::from_str(r#"{"tipos_contas": null}"#).unwrap();
        assert!(body.name.is_none());
    }

    #[test]
    fn bank_account_date_accepts_both_spellings() {
        let legacy: bank_account::BankAccountPayload =
            serde_json::from_str(r#"{"data_conta_saldo_incial": "2024-01-15"}"#).unwrap();
        assert_eq!(legacy.initial_balance_date.as_deref(), Some("2024-01-15"));

        let fixed: bank_account::BankAccountPayload =
            serde_json::from_str(r#"{"data_conta_saldo_inicial": "2024-02-01"}"#).unwrap();
        assert_eq!(fixed.initial_balance_date.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn statement_payload_uses_camel_case_keys() {
        let body: card::CardStatementPayload = serde_json::from_str(
            r#"{
                "faturasCartoesDtVencimento": "2024-03-10",
                "faturasCartoesFechamento": "2024-03-01",
                "faturasCartoesValor": 150.75,
                "faturasCartoesFechada": true
            }"#,
        )
        .unwrap();
        assert_eq!(body.due_date.as_deref(), Some("2024-03-10"));
        assert_eq!(body.amount.map(|a| a.as_text()).as_deref(), Some("150.75"));
        assert_eq!(body.closed, Some(true));
        assert!(body.month_year.is_none());
    }

    #[test]
    fn wrongly_typed_field_is_rejected() {
        let err = serde_json::from_str::<category::CategoryPayload>(
            r#"{"categorias_nome": "Casa", "categorias_classe": "um"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn card_view_renames_final() {
        let view = card::CardView {
            id: 1,
            nome: "Visa".to_string(),
            last_digits: "1234".to_string(),
            tipo: "Crédito".to_string(),
            conta_vinculada: false,
            faturas: vec![],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["final"], "1234");
        assert!(json.get("last_digits").is_none());
    }
}
