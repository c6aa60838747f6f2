pub mod cal;
pub mod cat;
pub mod cd;
pub mod exit;
pub mod ls;
pub mod pwd;
pub mod rev;
