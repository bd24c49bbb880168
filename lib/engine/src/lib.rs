/**
 * 西洋跳棋（8x8）规则引擎库入口
 *
 * 说明
 * - board: 棋盘与棋子的数据表示
 * - constant: 棋盘尺寸与布局文件编码
 * - error: 走子与加载布局的错误类型
 * - layout: 布局文件的读取与导出
 * - rules: 走法、吃子、连吃、升王与胜负判断
 * - engine: 点击驱动的对局控制
 */
pub mod board;
pub mod constant;
pub mod engine;
pub mod error;
pub mod layout;
pub mod rules;
