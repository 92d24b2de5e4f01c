pub mod import_cmds;
