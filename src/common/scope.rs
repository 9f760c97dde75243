// src/common/scope.rs

use uuid::Uuid;

/// O hotel ao qual uma operação está presa.
///
/// Todo método de repositório que toca dados de um hotel recebe um `TenantScope`
/// e filtra por `tenant_id` em cada leitura e escrita. Só o `tenant_guard`
/// (a partir do usuário autenticado) e os testes constroem um.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantScope(Uuid);

impl TenantScope {
    pub fn new(tenant_id: Uuid) -> Self {
        Self(tenant_id)
    }

    pub fn tenant_id(&self) -> Uuid {
        self.0
    }
}
