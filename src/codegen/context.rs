//! 代码生成上下文和计数器状态
//!
//! 临时变量和寄存器编号都属于单次编译，每次编译从 1 开始。

#[derive(Debug, Default)]
pub struct CodegenContext {
    pub temp_counter: usize,
    pub register_counter: usize,
}

impl CodegenContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配新的临时变量 `t1`, `t2`, ...
    pub fn new_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("t{}", self.temp_counter)
    }

    /// 分配新的寄存器 `R1`, `R2`, ...
    pub fn new_register(&mut self) -> String {
        self.register_counter += 1;
        format!("R{}", self.register_counter)
    }

    pub fn reset(&mut self) {
        self.temp_counter = 0;
        self.register_counter = 0;
    }
}
