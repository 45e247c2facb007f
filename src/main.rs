// ==========================================
// Calculadora de Frete por Zoneamento - CLI
// ==========================================
// Uso:
//   calculadora-frete lote <tabela> <lote> <saida.csv>
//   calculadora-frete calcular <tabela> <zoneamento> [eg g m p mi] [gris]
//   calculadora-frete modelo <saida.csv>
// ==========================================

use calculadora_frete::domain::freight::{FreightRequest, VolumeItem};
use calculadora_frete::domain::types::VolumeSize;
use calculadora_frete::engine::{BatchProcessor, FreightEngine};
use calculadora_frete::export::{exportar_lote_csv, exportar_modelo_lote_csv};
use calculadora_frete::importer::ingestion::{parse_decimal, parse_quantidade};
use calculadora_frete::importer::{FreightImporter, FreightImporterImpl};
use std::path::Path;

const USO: &str = "Uso:
  calculadora-frete lote <tabela.(xlsx|csv)> <lote.(xlsx|csv)> <saida.csv>
  calculadora-frete calcular <tabela.(xlsx|csv)> <zoneamento> [eg g m p mi] [gris]
  calculadora-frete modelo <saida.csv>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o sistema de logs
    calculadora_frete::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", calculadora_frete::APP_NAME);
    tracing::info!("Versão: {}", calculadora_frete::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("lote") if args.len() == 4 => executar_lote(&args[1], &args[2], &args[3]).await,
        Some("calcular") if args.len() >= 3 => executar_calculo(&args[1], &args[2], &args[3..]).await,
        Some("modelo") if args.len() == 2 => {
            exportar_modelo_lote_csv(Path::new(&args[1]))?;
            println!("Modelo de input gravado em {}", args[1]);
            Ok(())
        }
        _ => {
            eprintln!("{}", USO);
            std::process::exit(2);
        }
    }
}

/// Processa um lote completo: tabela + arquivo de lote → CSV de saída
async fn executar_lote(tabela: &str, lote: &str, saida: &str) -> anyhow::Result<()> {
    let importador = FreightImporterImpl::padrao();

    let tabela_frete = importador.importar_tabela_frete(Path::new(tabela)).await?;
    let linhas = importador.importar_linhas_lote(Path::new(lote)).await?;

    let processador = BatchProcessor::new();
    let (resultados, resumo) = processador.processar(linhas, &tabela_frete);

    exportar_lote_csv(&resultados, Path::new(saida))?;

    println!(
        "Lote {}: {} linhas, {} sucesso(s), {} erro(s). Saída: {}",
        resumo.lote_id, resumo.total, resumo.sucessos, resumo.erros, saida
    );
    Ok(())
}

/// Calcula um único embarque e imprime a memória de cálculo
///
/// As quantidades entram na ordem EXTRA GRANDE, GRANDE, MEDIA,
/// PEQUENA, MICRO; um sexto número é tratado como GRIS manual.
async fn executar_calculo(tabela: &str, zoneamento: &str, numeros: &[String]) -> anyhow::Result<()> {
    let importador = FreightImporterImpl::padrao();
    let tabela_frete = importador.importar_tabela_frete(Path::new(tabela)).await?;

    let mut volumes = Vec::new();
    for (tipo, texto) in VolumeSize::TODOS.iter().zip(numeros.iter()) {
        let qtd = parse_quantidade(texto);
        if qtd > 0 {
            volumes.push(VolumeItem { tipo: *tipo, qtd });
        }
    }
    let gris = numeros
        .get(VolumeSize::TODOS.len())
        .map(|texto| parse_decimal(texto))
        .filter(|valor| *valor > 0.0);

    let pedido = FreightRequest {
        zoneamento: zoneamento.to_string(),
        volumes,
        gris,
    };

    let resultado = FreightEngine::new().calcular(&pedido, &tabela_frete);

    println!("Memória de cálculo:");
    for passo in &resultado.passos {
        println!("  {}", passo);
    }
    println!("{}", serde_json::to_string_pretty(&resultado)?);

    if !resultado.sucesso() {
        std::process::exit(1);
    }
    Ok(())
}
