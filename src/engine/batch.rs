// ==========================================
// Calculadora de Frete - Processador de Lote
// ==========================================
// Responsabilidade: aplicar o motor a todas as linhas do lote
// Entrada: linhas ingeridas + tabela de frete compartilhada
// Saída: resultados na mesma ordem + resumo (total/sucessos/erros)
// ==========================================
// Cada linha é independente: erro em uma linha nunca interrompe
// nem altera as demais. Sem reordenação, sem deduplicação, sem
// retentativa.
// ==========================================

use crate::domain::freight::{
    BatchInputRow, BatchResultRow, BatchSummary, FreightRequest, FreightTable, VolumeItem,
};
use crate::domain::types::{RowStatus, VolumeSize};
use crate::engine::freight::FreightEngine;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// BatchProcessor
// ==========================================
pub struct BatchProcessor {
    motor: FreightEngine,
}

impl BatchProcessor {
    pub fn new() -> Self {
        Self {
            motor: FreightEngine::new(),
        }
    }

    // ==========================================
    // Método principal
    // ==========================================

    /// Processa todas as linhas do lote contra a tabela.
    ///
    /// # Retorno
    /// - Vec<BatchResultRow>: uma saída por entrada, mesma ordem
    /// - BatchSummary: identificador do lote e contagens
    #[instrument(skip(self, linhas, tabela), fields(total = linhas.len()))]
    pub fn processar(
        &self,
        linhas: Vec<BatchInputRow>,
        tabela: &FreightTable,
    ) -> (Vec<BatchResultRow>, BatchSummary) {
        let iniciado_em = Utc::now();
        let lote_id = Uuid::new_v4().to_string();
        info!(lote_id = %lote_id, total = linhas.len(), "Iniciando processamento do lote");

        let mut resultados = Vec::with_capacity(linhas.len());
        let mut sucessos = 0usize;
        let mut erros = 0usize;

        for linha in linhas {
            let calculo = self.motor.calcular(&Self::montar_pedido(&linha), tabela);

            let status = if calculo.sucesso() {
                sucessos += 1;
                RowStatus::Sucesso
            } else {
                erros += 1;
                debug!(cte = %linha.cte, zoneamento = %linha.zoneamento, "Linha com erro de cálculo");
                RowStatus::Erro
            };

            let observacoes = match &calculo.erro {
                Some(erro) => format!(
                    "{} - {}",
                    erro,
                    calculo.passos.last().map(String::as_str).unwrap_or("")
                ),
                None => format!("Maior: {}", calculo.rotulo_maior_tipo()),
            };

            resultados.push(BatchResultRow {
                cte: linha.cte,
                zoneamento: linha.zoneamento,
                gris: linha.gris,
                qtd_extra_grande: linha.qtd_extra_grande,
                qtd_grande: linha.qtd_grande,
                qtd_media: linha.qtd_media,
                qtd_pequena: linha.qtd_pequena,
                qtd_micro: linha.qtd_micro,
                extras: linha.extras,
                frete_final: calculo.frete_final_icms,
                frete_bruto: calculo.frete_bruto,
                divisor_icms: calculo.icms_divisor,
                valor_primeiro_volume: calculo.primeiro_volume,
                valor_total_adicionais: calculo.soma_adicionais,
                gris_aplicado: calculo.gris,
                status,
                observacoes,
            });
        }

        let resumo = BatchSummary {
            lote_id,
            total: resultados.len(),
            sucessos,
            erros,
            iniciado_em,
            concluido_em: Utc::now(),
        };
        info!(
            total = resumo.total,
            sucessos = resumo.sucessos,
            erros = resumo.erros,
            "Processamento do lote concluído"
        );

        (resultados, resumo)
    }

    /// Monta o pedido de cálculo a partir da linha de lote.
    ///
    /// Os volumes entram na ordem fixa de tamanho (do maior para o
    /// menor), apenas com quantidade positiva. GRIS manual só é
    /// repassado quando positivo.
    fn montar_pedido(linha: &BatchInputRow) -> FreightRequest {
        let mut volumes = Vec::new();
        for tipo in VolumeSize::TODOS {
            let qtd = linha.qtd(tipo);
            if qtd > 0 {
                volumes.push(VolumeItem { tipo, qtd });
            }
        }

        FreightRequest {
            zoneamento: linha.zoneamento.clone(),
            volumes,
            gris: (linha.gris > 0.0).then_some(linha.gris),
        }
    }
}
