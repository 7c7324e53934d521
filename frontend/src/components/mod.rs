pub mod agent_panel;
