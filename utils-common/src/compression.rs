use std::io::{self, Read};
use flate2::{Compression, write::GzEncoder, read::GzDecoder};

/// 魔数常量 - 用于标识文件格式
pub const MAGIC_BYTES: &[u8] = b"PFCMP"; // Portfolio Filter Compressed

/// 头部长度：魔数 + 版本号(2) + 原始大小(4)
const HEADER_LEN: usize = MAGIC_BYTES.len() + 2 + 4;

/// 压缩数据头部
struct Header {
    version: [u8; 2],
    original_size: usize,
}

/// 解析并校验头部
fn read_header(data: &[u8], max_version: u8) -> Result<Header, io::Error> {
    if data.len() < HEADER_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("数据太短，无法解析: {} 字节", data.len()),
        ));
    }

    if &data[..MAGIC_BYTES.len()] != MAGIC_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "无效的文件格式：魔数不匹配",
        ));
    }

    let version_offset = MAGIC_BYTES.len();
    let version = [data[version_offset], data[version_offset + 1]];
    if version[0] > max_version {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("不支持的版本: {}.{}", version[0], version[1]),
        ));
    }

    let size_offset = version_offset + 2;
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(&data[size_offset..HEADER_LEN]);

    Ok(Header {
        version,
        original_size: u32::from_le_bytes(size_bytes) as usize,
    })
}

/// 将对象序列化为二进制格式
pub fn to_binary<T: serde::Serialize>(obj: &T) -> Result<Vec<u8>, io::Error> {
    bincode::serde::encode_to_vec(obj, bincode::config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("序列化失败: {}", e)))
}

/// 从二进制格式反序列化对象
pub fn from_binary<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, io::Error> {
    bincode::serde::decode_from_slice(data, bincode::config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("反序列化失败: {}", e)))
        .map(|(value, _)| value)
}

/// 将对象序列化为压缩的二进制格式
pub fn to_compressed<T: serde::Serialize>(obj: &T, version: [u8; 2]) -> Result<Vec<u8>, io::Error> {
    let binary = to_binary(obj)?;
    let data_len = u32::try_from(binary.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("数据过大: {} 字节", binary.len()))
    })?;

    let mut output = Vec::with_capacity(HEADER_LEN + binary.len() / 2);
    output.extend_from_slice(MAGIC_BYTES);
    output.extend_from_slice(&version);
    output.extend_from_slice(&data_len.to_le_bytes());

    let mut encoder = GzEncoder::new(output, Compression::best());
    std::io::Write::write_all(&mut encoder, &binary)?;
    encoder.finish()
}

/// 从压缩的二进制格式反序列化对象，默认最大版本1
pub fn from_compressed<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, io::Error> {
    from_compressed_with_max_version(data, 1)
}

/// 从压缩的二进制格式反序列化对象，允许指定支持的最大版本
pub fn from_compressed_with_max_version<T: for<'a> serde::de::Deserialize<'a>>(
    data: &[u8],
    max_version: u8,
) -> Result<T, io::Error> {
    let header = read_header(data, max_version)?;

    let mut decoder = GzDecoder::new(&data[HEADER_LEN..]);
    let mut decompressed = Vec::with_capacity(header.original_size);
    decoder.read_to_end(&mut decompressed)?;

    if decompressed.len() != header.original_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "解压后数据大小不匹配: 期望 {} 字节, 实际 {} 字节",
                header.original_size,
                decompressed.len()
            ),
        ));
    }

    from_binary(&decompressed)
}

/// 验证压缩数据头部是否有效，返回版本号
pub fn validate_compressed_data(data: &[u8]) -> Result<[u8; 2], io::Error> {
    validate_compressed_data_with_max_version(data, 1)
}

/// 验证压缩数据头部是否有效，允许指定支持的最大版本
pub fn validate_compressed_data_with_max_version(data: &[u8], max_version: u8) -> Result<[u8; 2], io::Error> {
    read_header(data, max_version).map(|header| header.version)
}
