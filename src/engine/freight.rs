// ==========================================
// Calculadora de Frete - Motor de Cálculo
// ==========================================
// Base: Regras_Comerciais_Frete.md - 3. Regra do 1º volume
// Restrição: toda etapa do cálculo sai na memória de cálculo
// ==========================================
// Responsabilidade: precificar UM embarque contra a tabela
// Entrada: FreightRequest + FreightTable (somente leitura)
// Saída: CalcResult com memória de cálculo ordenada
// ==========================================

use crate::domain::freight::{AdditionalDetail, CalcResult, FreightRequest, FreightTable};
use crate::domain::types::{CalcError, VolumeSize};
use tracing::instrument;

// ==========================================
// Constantes do domínio
// ==========================================

/// Divisor de ICMS padrão (fator de inclusão do imposto)
pub const DIVISOR_ICMS_PADRAO: f64 = 0.88;

/// Divisor para zona isenta de ICMS
pub const DIVISOR_ICMS_ISENTO: f64 = 1.0;

/// Prefixo de zoneamento da região isenta de ICMS.
/// Teste de prefixo apenas; o restante do identificador não é validado.
pub const PREFIXO_ISENCAO_ICMS: &str = "RJ";

/// Arredonda para 2 casas decimais
fn arredondar_2(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

// ==========================================
// FreightEngine - Motor de cálculo de frete
// ==========================================
pub struct FreightEngine;

impl FreightEngine {
    /// Cria o motor (sem estado; dois cálculos com a mesma entrada
    /// produzem resultados idênticos)
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // Método principal
    // ==========================================

    /// Calcula o frete de um embarque.
    ///
    /// Etapas (ordem fixa, uma linha de memória por etapa):
    /// 1) Divisor de ICMS pelo prefixo do zoneamento (RJ → 1.0)
    /// 2) Busca do zoneamento na tabela (ausente → erro terminal)
    /// 3) Resolução do GRIS (tabela > manual > nenhum)
    /// 4) Agregação dos volumes por tamanho (qtd 0 ignorada)
    /// 5) Maior tipo presente define o 1º volume
    /// 6) Adicionais: 1 unidade do maior tipo reservada para o base
    /// 7) Frete bruto = 1º volume + adicionais + GRIS;
    ///    frete final = bruto / divisor (totais a 2 casas)
    #[instrument(skip(self, pedido, tabela), fields(zoneamento = %pedido.zoneamento))]
    pub fn calcular(&self, pedido: &FreightRequest, tabela: &FreightTable) -> CalcResult {
        let mut passos = vec![format!("Buscando zoneamento: \"{}\"...", pedido.zoneamento)];

        // Etapa 1: divisor de ICMS pelo prefixo da zona
        let zona_isenta = pedido
            .zoneamento
            .trim()
            .to_uppercase()
            .starts_with(PREFIXO_ISENCAO_ICMS);
        let divisor = if zona_isenta {
            DIVISOR_ICMS_ISENTO
        } else {
            DIVISOR_ICMS_PADRAO
        };

        // Etapa 2: busca na tabela (caso terminal)
        let Some(linha) = tabela.buscar(&pedido.zoneamento) else {
            passos.push(format!(
                "ERRO: Zoneamento \"{}\" não encontrado na tabela.",
                pedido.zoneamento
            ));
            return CalcResult {
                zoneamento: pedido.zoneamento.clone(),
                maior_tipo: None,
                prioridade: None,
                primeiro_volume: 0.0,
                adicionais: vec![],
                soma_adicionais: 0.0,
                gris: 0.0,
                // Em erro o divisor reportado é o padrão da tabela,
                // independente do prefixo da zona
                icms_divisor: DIVISOR_ICMS_PADRAO,
                frete_bruto: 0.0,
                frete_final_icms: 0.0,
                passos,
                erro: Some(CalcError::ZoneamentoNaoEncontrado),
            };
        };

        passos.push("Zoneamento encontrado.".to_string());
        if zona_isenta {
            passos.push("Zona RJ detectada: Divisor ICMS ajustado para 1.0 (Isento).".to_string());
        } else {
            passos.push("Zona padrão: Aplicação de ICMS (Divisor 0.88).".to_string());
        }

        // Etapa 3: GRIS da tabela tem precedência total sobre o manual
        let gris_tabela = linha.gris.unwrap_or(0.0);
        let gris_manual = pedido.gris.unwrap_or(0.0);
        let gris = if gris_tabela > 0.0 {
            passos.push(format!(
                "GRIS encontrado na tabela de frete: R$ {:.2}",
                gris_tabela
            ));
            gris_tabela
        } else if gris_manual > 0.0 {
            passos.push(format!(
                "GRIS utilizado do input manual/lote: R$ {:.2}",
                gris_manual
            ));
            gris_manual
        } else {
            passos.push("Nenhum valor de GRIS aplicável.".to_string());
            0.0
        };

        // Etapa 4: agrega por tamanho na ordem de primeira aparição
        let mut agregados: Vec<(VolumeSize, u32)> = Vec::new();
        for item in &pedido.volumes {
            if item.qtd == 0 {
                continue;
            }
            match agregados.iter_mut().find(|(tipo, _)| *tipo == item.tipo) {
                Some((_, qtd)) => *qtd += item.qtd,
                None => agregados.push((item.tipo, item.qtd)),
            }
        }

        // Sem volumes: frete é só o GRIS (caso válido, não erro)
        if agregados.is_empty() {
            passos.push("Nenhum volume informado.".to_string());
            return CalcResult {
                zoneamento: pedido.zoneamento.clone(),
                maior_tipo: None,
                prioridade: None,
                primeiro_volume: 0.0,
                adicionais: vec![],
                soma_adicionais: 0.0,
                gris,
                icms_divisor: divisor,
                frete_bruto: arredondar_2(gris),
                frete_final_icms: arredondar_2(gris / divisor),
                passos,
                erro: None,
            };
        }

        // Etapa 5: maior tipo presente (prioridades são distintas,
        // empate é impossível)
        let (maior_tipo, _) = *agregados
            .iter()
            .max_by_key(|(tipo, _)| tipo.prioridade())
            .expect("agregados não está vazio");
        let prioridade = maior_tipo.prioridade();
        passos.push(format!(
            "Maior tipo identificado: {} (Prioridade {})",
            maior_tipo, prioridade
        ));

        let primeiro_volume = linha.valor_primeiro_volume(maior_tipo);
        passos.push(format!(
            "Valor do 1º Volume ({}): R$ {:.2}",
            maior_tipo, primeiro_volume
        ));

        // Etapa 6: adicionais; exatamente 1 unidade do maior tipo já
        // está paga pelo valor base e é reservada uma única vez
        let mut soma_adicionais = 0.0;
        let mut adicionais = Vec::new();
        let mut primeiro_consumido = false;

        for (tipo, qtd) in &agregados {
            let mut qtd_adicional = *qtd;

            if !primeiro_consumido && *tipo == maior_tipo {
                qtd_adicional -= 1;
                primeiro_consumido = true;
                passos.push(format!(
                    "Removido 1 unidade de {} para compor o valor base.",
                    tipo
                ));
            }

            if qtd_adicional > 0 {
                let valor_unitario = linha.valor_adicional(*tipo);
                let subtotal = qtd_adicional as f64 * valor_unitario;
                soma_adicionais += subtotal;

                adicionais.push(AdditionalDetail {
                    tipo: *tipo,
                    qtd: qtd_adicional,
                    valor_unitario,
                    subtotal,
                });
                passos.push(format!(
                    "Adicionais {}: {} x R$ {:.2} = R$ {:.2}",
                    tipo, qtd_adicional, valor_unitario, subtotal
                ));
            }
        }

        // Etapa 7: totais
        passos.push(format!(
            "Soma Parcial (1º Vol + Adicionais): R$ {:.2}",
            primeiro_volume + soma_adicionais
        ));
        if gris > 0.0 {
            passos.push(format!("Adicionando GRIS: R$ {:.2}", gris));
        }

        let frete_bruto = primeiro_volume + soma_adicionais + gris;
        passos.push(format!(
            "Frete Bruto (Base + Adicionais + GRIS): R$ {:.2}",
            frete_bruto
        ));

        // A divisão usa o valor em precisão plena, não o arredondado
        let frete_final = frete_bruto / divisor;
        passos.push(format!("Cálculo ICMS: {:.2} / {}", frete_bruto, divisor));
        passos.push(format!("Frete Final: R$ {:.2}", frete_final));

        CalcResult {
            zoneamento: pedido.zoneamento.clone(),
            maior_tipo: Some(maior_tipo),
            prioridade: Some(prioridade),
            primeiro_volume: arredondar_2(primeiro_volume),
            adicionais,
            soma_adicionais: arredondar_2(soma_adicionais),
            gris,
            icms_divisor: divisor,
            frete_bruto: arredondar_2(frete_bruto),
            frete_final_icms: arredondar_2(frete_final),
            passos,
            erro: None,
        }
    }
}
