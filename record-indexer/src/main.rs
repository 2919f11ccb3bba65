use std::fs;
use std::path::Path;
use clap::{Command, Arg, ArgAction};
use walkdir::WalkDir;

use record_filter::{FilterBuilder, Payload};
use utils_common::validate_compressed_data;

// 主函数
fn main() {
    let matches = Command::new("简历记录索引生成器")
        .version(env!("CARGO_PKG_VERSION"))
        .about("从简历数据生成出版物筛选索引")
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .value_name("SOURCE")
            .help("简历数据文件或目录路径（JSON）")
            .required(true))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("OUTPUT_DIR")
            .help("索引输出目录路径")
            .required(true))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细信息")
            .action(ArgAction::SetTrue))
        .get_matches();

    // required 参数由 clap 保证存在
    let (Some(source), Some(output_dir)) = (
        matches.get_one::<String>("source"),
        matches.get_one::<String>("output"),
    ) else {
        eprintln!("错误: 缺少必需参数");
        std::process::exit(2);
    };
    let verbose = matches.get_flag("verbose");

    if !Path::new(source).exists() {
        eprintln!("错误: 数据源不存在 '{}'", source);
        std::process::exit(1);
    }

    let output_path = Path::new(output_dir);
    if !output_path.exists() {
        if let Err(e) = fs::create_dir_all(output_path) {
            eprintln!("错误: 无法创建输出目录 '{}': {}", output_dir, e);
            std::process::exit(1);
        }
    }

    println!("开始生成索引...");
    println!("数据源: {}", source);
    println!("输出目录: {}", output_dir);

    match generate_index(source, output_dir, verbose) {
        Ok(_) => println!("索引生成成功！"),
        Err(e) => {
            eprintln!("错误: 索引生成失败: {}", e);
            std::process::exit(1);
        }
    }
}

// 生成索引
fn generate_index(source: &str, output_dir: &str, verbose: bool) -> Result<(), String> {
    let start_time = std::time::Instant::now();

    println!("扫描简历数据...");
    let (payloads, skipped_count) = scan_payloads(source, verbose)?;

    let mut builder = FilterBuilder::new();
    for payload in payloads {
        builder.add_payload(payload);
    }

    let record_count = builder.record_count();
    println!("扫描完成。找到 {} 条记录，跳过 {} 个文件。", record_count, skipped_count);

    if record_count == 0 {
        return Err("没有找到有效记录".to_string());
    }

    let index = builder.build_filter_index()?;
    if verbose {
        println!("分面: {}", index.facets.join(", "));
    }

    let filter_index_path = Path::new(output_dir).join("filter_index.bin");
    let filter_index_path = filter_index_path.to_string_lossy();
    builder.save_filter_index(&filter_index_path)?;

    let written = fs::read(&*filter_index_path)
        .map_err(|e| format!("无法读取已写入的索引 {}: {}", filter_index_path, e))?;
    let version = validate_compressed_data(&written).map_err(|e| format!("索引校验失败: {}", e))?;

    let elapsed = start_time.elapsed();
    println!(
        "索引生成完成！版本: {}.{}，记录: {}，分面: {}，耗时: {:.2}秒",
        version[0],
        version[1],
        index.metadata.record_count,
        index.metadata.facet_count,
        elapsed.as_secs_f32()
    );

    Ok(())
}

// 读取单个文件或递归扫描目录中的 JSON 数据
fn scan_payloads(source: &str, verbose: bool) -> Result<(Vec<Payload>, usize), String> {
    let mut payloads = Vec::new();
    let mut skipped = 0;

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| format!("遍历目录时出错: {}", e))?;

        if !entry.file_type().is_file() || !entry.path().extension().map_or(false, |ext| ext == "json") {
            continue;
        }

        match read_payload(entry.path()) {
            Ok(payload) => {
                if verbose {
                    println!("读取 {}: {} 条记录", entry.path().display(), payload.publications.len());
                }
                payloads.push(payload);
            }
            Err(err) => {
                skipped += 1;
                if verbose {
                    eprintln!("解析文件时出错 {}: {}", entry.path().display(), err);
                }
            }
        }
    }

    Ok((payloads, skipped))
}

fn read_payload(path: &Path) -> Result<Payload, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("无法读取文件 {}: {}", path.display(), e))?;
    serde_json::from_str(&json).map_err(|e| format!("JSON 格式错误: {}", e))
}
