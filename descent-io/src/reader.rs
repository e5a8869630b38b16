use crate::DxfError;

/// 逐行游标。按文档顺序一次性切分，读取时只推进下标。
///
/// 每行末尾的 `\r` 会被去掉，以便 CRLF 文件与 LF 文件得到相同的标记；
/// 空行或仅含空白的行保持原样，作为普通标记参与匹配。
pub(crate) struct LineCursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let lines = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self { lines, position: 0 }
    }

    /// 读取并消费下一行；已到末尾时返回 `OutOfInput`。
    pub(crate) fn next_line(&mut self) -> Result<&'a str, DxfError> {
        match self.lines.get(self.position) {
            Some(&line) => {
                self.position += 1;
                Ok(line)
            }
            None => Err(DxfError::OutOfInput {
                line: self.position + 1,
            }),
        }
    }

    /// 查看下一行但不消费。
    pub(crate) fn peek_line(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    /// 最近一次消费的行号（从 1 开始，尚未读取时为 0）。
    pub(crate) fn line_number(&self) -> usize {
        self.position
    }
}
